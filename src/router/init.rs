//! One-time router initialisation, run as an upgrade's init call.

use tracing::info;

use super::RouterLayout;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Event, Selector};
use crate::error::{DexError, Result};
use crate::facets::facet_identity;
use crate::traits::{Facet, Layout};

facet_identity!(
    /// Links a fresh router to its factory and records its defaults.
    RouterInitFacet,
    "router-init"
);

const SELECTORS: &[Selector] = &[Selector::InitRouter];

impl Facet<RouterLayout> for RouterInitFacet {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn selectors(&self) -> &'static [Selector] {
        SELECTORS
    }

    fn execute(&self, ctx: &mut Context<'_, RouterLayout>, call: Call) -> Result<Return> {
        let Call::InitRouter { factory, config } = call else {
            return Err(DexError::UnknownOperation(call.selector()));
        };
        ctx.require_owner()?;
        if ctx.layout().initialized() {
            return Err(DexError::AlreadyInitialized);
        }
        if factory.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        config.validate()?;
        info!(
            router = %ctx.this(),
            %factory,
            create_missing_pairs = config.create_missing_pairs(),
            "router initialised"
        );
        ctx.layout_mut().initialize(factory, config);
        ctx.emit(Event::Initialized {
            layout: RouterLayout::NAME,
            version: RouterLayout::VERSION,
        });
        Ok(Return::Unit)
    }
}

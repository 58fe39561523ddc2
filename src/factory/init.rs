//! One-time factory initialisation, run as an upgrade's init call.

use tracing::info;

use super::FactoryLayout;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Event, Selector};
use crate::error::{DexError, Result};
use crate::facets::facet_identity;
use crate::traits::{Facet, Layout};

facet_identity!(
    /// Records the fee governance of a fresh factory.
    ///
    /// Meant as the init target of the factory's first upgrade rather than
    /// a dispatch-table entry.  A second run fails with
    /// [`DexError::AlreadyInitialized`].
    FactoryInitFacet,
    "factory-init"
);

const SELECTORS: &[Selector] = &[Selector::InitFactory];

impl Facet<FactoryLayout> for FactoryInitFacet {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn selectors(&self) -> &'static [Selector] {
        SELECTORS
    }

    fn execute(&self, ctx: &mut Context<'_, FactoryLayout>, call: Call) -> Result<Return> {
        let Call::InitFactory(config) = call else {
            return Err(DexError::UnknownOperation(call.selector()));
        };
        ctx.require_owner()?;
        if ctx.layout().initialized() {
            return Err(DexError::AlreadyInitialized);
        }
        config.validate()?;
        ctx.layout_mut().initialize(&config);
        info!(
            factory = %ctx.this(),
            fee_setter = %config.fee_setter(),
            fee_to = %config.fee_to(),
            policy = %config.protocol_fee_policy(),
            "factory initialised"
        );
        ctx.emit(Event::Initialized {
            layout: FactoryLayout::NAME,
            version: FactoryLayout::VERSION,
        });
        Ok(Return::Unit)
    }
}

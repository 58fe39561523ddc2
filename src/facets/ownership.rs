//! Single-owner authority.

use tracing::info;

use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Event, Selector};
use crate::error::{DexError, Result};
use crate::traits::{Facet, Layout};

super::facet_identity!(
    /// Reports and transfers diamond ownership.
    ///
    /// The owner alone may upgrade the diamond, so ownership cannot be
    /// handed to the null address.
    OwnershipFacet,
    "ownership"
);

const SELECTORS: &[Selector] = &[Selector::Owner, Selector::TransferOwnership];

impl<L: Layout> Facet<L> for OwnershipFacet {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn selectors(&self) -> &'static [Selector] {
        SELECTORS
    }

    fn execute(&self, ctx: &mut Context<'_, L>, call: Call) -> Result<Return> {
        match call {
            Call::Owner => Ok(Return::Address(ctx.storage().core().owner())),
            Call::TransferOwnership { new_owner } => {
                ctx.require_owner()?;
                if new_owner.is_zero() {
                    return Err(DexError::ZeroAddress);
                }
                let previous = ctx.storage().core().owner();
                ctx.storage_mut().core_mut().set_owner(new_owner);
                info!(diamond = %ctx.this(), %previous, new = %new_owner, "ownership transferred");
                ctx.emit(Event::OwnershipTransferred {
                    previous,
                    new: new_owner,
                });
                Ok(Return::Unit)
            }
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

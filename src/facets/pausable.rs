//! Global halt switch.

use tracing::info;

use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Event, Selector};
use crate::error::{DexError, Result};
use crate::traits::{Facet, Layout};

super::facet_identity!(
    /// Toggles the pause flag that the diamond checks before dispatching
    /// any pausable operation.
    ///
    /// The owner and any guardian the owner appoints may pause and
    /// unpause.  Toggling to the current state is a no-op and records no
    /// event.
    PausableFacet,
    "pausable"
);

const SELECTORS: &[Selector] = &[
    Selector::Paused,
    Selector::Pause,
    Selector::Unpause,
    Selector::SetGuardian,
    Selector::IsGuardian,
];

fn set_paused<L: Layout>(ctx: &mut Context<'_, L>, paused: bool) -> Result<Return> {
    let caller = ctx.caller();
    ctx.storage().core().require_pause_authority(caller)?;
    if ctx.storage().core().paused() == paused {
        return Ok(Return::Unit);
    }
    ctx.storage_mut().core_mut().set_paused(paused);
    info!(diamond = %ctx.this(), %caller, paused, "pause switch toggled");
    ctx.emit(if paused {
        Event::Paused { account: caller }
    } else {
        Event::Unpaused { account: caller }
    });
    Ok(Return::Unit)
}

impl<L: Layout> Facet<L> for PausableFacet {
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
            Call::Paused => Ok(Return::Bool(ctx.storage().core().paused())),
            Call::Pause => set_paused(ctx, true),
            Call::Unpause => set_paused(ctx, false),
            Call::SetGuardian { account, enabled } => {
                ctx.require_owner()?;
                if account.is_zero() {
                    return Err(DexError::ZeroAddress);
                }
                ctx.storage_mut().core_mut().set_guardian(account, enabled);
                ctx.emit(Event::GuardianSet { account, enabled });
                Ok(Return::Unit)
            }
            Call::IsGuardian { account } => {
                Ok(Return::Bool(ctx.storage().core().is_guardian(account)))
            }
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

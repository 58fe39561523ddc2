//! Multi-facet dispatch over one shared storage space.
//!
//! A [`Diamond`] is one external identity in front of many independently
//! versioned [`Facet`]s.  Each incoming [`Call`] is routed by its
//! [`Selector`] through the [`DispatchTable`] to the owning facet, which
//! executes against the diamond's single [`Storage`].
//!
//! ```text
//!   caller ──Call──▶ Diamond ──selector──▶ DispatchTable ──▶ Facet
//!                       │                                      │
//!                       └──────────── Storage<L> ◀─────────────┘
//!                         (dispatch table, core slots, layout L)
//! ```
//!
//! # Atomicity
//!
//! Both [`Diamond::execute`] and [`Diamond::upgrade`] checkpoint the
//! storage first and restore it if anything fails, so a failed operation
//! leaves no trace, events included.  The checkpoint is a clone of the
//! whole storage, linear in the number of pools and journalled events.
//!
//! [`Facet`]: crate::traits::Facet
//! [`Selector`]: crate::domain::Selector

mod call;
mod context;
mod cut;
mod dispatch;
pub mod guard;
mod storage;

pub use call::{
    AddLiquidityParams, Call, RemoveLiquidityParams, Return, SwapExactInParams,
    SwapExactOutParams,
};
pub use context::Context;
pub use cut::{CutSummary, DiamondCut, FacetCut, InitCall};
pub use dispatch::{DispatchTable, FacetInfo};
pub use storage::{CoreSlots, Storage};

use tracing::{info, trace, warn};

use crate::domain::{Address, Event, Selector};
use crate::error::{DexError, Result};
use crate::traits::{Host, Layout};

/// One external identity with pluggable facets and shared storage.
#[derive(Debug, Clone)]
pub struct Diamond<L: Layout> {
    address: Address,
    storage: Storage<L>,
}

impl<L: Layout> Diamond<L> {
    /// A diamond at `address`, owned by `owner`, with no facets yet.
    #[must_use]
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            storage: Storage::new(owner),
        }
    }

    /// External identity.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Read access to the whole storage.
    #[must_use]
    pub const fn storage(&self) -> &Storage<L> {
        &self.storage
    }

    /// Application layout.
    #[must_use]
    pub const fn layout(&self) -> &L {
        self.storage.layout()
    }

    /// Current owner.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.storage.core().owner()
    }

    /// Whether pausable operations are blocked.
    #[must_use]
    pub const fn paused(&self) -> bool {
        self.storage.core().paused()
    }

    /// Every facet with its selectors.
    #[must_use]
    pub fn facets(&self) -> Vec<FacetInfo> {
        self.storage.dispatch().facets()
    }

    /// Selectors owned by `facet`; empty for an unknown facet.
    #[must_use]
    pub fn facet_selectors(&self, facet: Address) -> Vec<Selector> {
        self.storage.dispatch().facet_selectors(facet)
    }

    /// Facet addresses in cut order.
    #[must_use]
    pub fn facet_addresses(&self) -> Vec<Address> {
        self.storage.dispatch().facet_addresses()
    }

    /// Facet owning `selector`, if any.
    #[must_use]
    pub fn facet_address(&self, selector: Selector) -> Option<Address> {
        self.storage.dispatch().facet_address(selector)
    }

    /// Drains the event journal.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.storage.core_mut().take_events()
    }

    #[cfg(test)]
    pub(crate) fn storage_mut(&mut self) -> &mut Storage<L> {
        &mut self.storage
    }

    /// Routes `call` to its facet and runs it on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownOperation`] if no facet owns the selector.
    /// - [`DexError::OperationPaused`] for a pausable selector while
    ///   paused; nothing else is evaluated first.
    /// - Whatever the facet raises, after the storage is restored.
    pub fn execute(&mut self, host: &mut dyn Host, caller: Address, call: Call) -> Result<Return> {
        let selector = call.selector();
        let Some(facet) = self.storage.dispatch().resolve(selector) else {
            return Err(DexError::UnknownOperation(selector));
        };
        if selector.is_pausable() && self.storage.core().paused() {
            return Err(DexError::OperationPaused);
        }
        trace!(diamond = %self.address, %selector, facet = facet.name(), "dispatch");

        let checkpoint = self.storage.clone();
        let outcome = {
            let mut ctx = Context::new(self.address, caller, &mut self.storage, host);
            facet.execute(&mut ctx, call)
        };
        if let Err(e) = &outcome {
            warn!(diamond = %self.address, %selector, error = %e, "operation rolled back");
            self.storage = checkpoint;
        }
        outcome
    }

    /// Applies an upgrade batch and its init call as one atomic unit.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] unless `caller` is the owner.
    /// - [`DexError::EmptyFacetCut`] for a batch with neither changes nor
    ///   an init call.
    /// - Any [`DispatchTable::apply`] error.
    /// - [`DexError::InitFailed`] wrapping the init call's error.
    pub fn upgrade(
        &mut self,
        host: &mut dyn Host,
        caller: Address,
        cut: DiamondCut<L>,
    ) -> Result<()> {
        self.storage.core().require_owner(caller)?;
        let (changes, init) = cut.into_parts();
        if changes.is_empty() && init.is_none() {
            return Err(DexError::EmptyFacetCut);
        }

        let checkpoint = self.storage.clone();
        let outcome = self.apply_cut(host, caller, &changes, init);
        if let Err(e) = &outcome {
            warn!(diamond = %self.address, error = %e, "upgrade rolled back");
            self.storage = checkpoint;
        }
        outcome
    }

    fn apply_cut(
        &mut self,
        host: &mut dyn Host,
        caller: Address,
        changes: &[FacetCut<L>],
        init: Option<InitCall<L>>,
    ) -> Result<()> {
        let summary = self.storage.dispatch_mut().apply(changes)?;
        let init_target = match init {
            Some(InitCall { target, payload }) => {
                let selector = payload.selector();
                if !target.selectors().contains(&selector) {
                    return Err(DexError::InitFailed(Box::new(
                        DexError::UnsupportedOperation {
                            facet: target.address(),
                            selector,
                        },
                    )));
                }
                let mut ctx = Context::new(self.address, caller, &mut self.storage, host);
                target
                    .execute(&mut ctx, payload)
                    .map_err(|e| DexError::InitFailed(Box::new(e)))?;
                Some(target.address())
            }
            None => None,
        };
        info!(
            diamond = %self.address,
            added = summary.added.len(),
            replaced = summary.replaced.len(),
            removed = summary.removed.len(),
            init = ?init_target,
            "diamond cut applied"
        );
        self.storage.core_mut().emit(Event::DiamondCut {
            added: summary.added,
            replaced: summary.replaced,
            removed: summary.removed,
            init: init_target,
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::FactoryConfig;
    use crate::domain::BasisPoints;
    use crate::error::Role;
    use crate::factory::{self, FactoryInitFacet, FactoryLayout};
    use crate::ledger::MemoryLedger;
    use crate::traits::TokenLedger;

    const OWNER: Address = Address::from_low_u64(1);
    const STRANGER: Address = Address::from_low_u64(2);

    struct Bare {
        ledger: MemoryLedger,
    }

    impl Host for Bare {
        fn ledger(&mut self) -> &mut dyn TokenLedger {
            &mut self.ledger
        }

        fn now(&self) -> u64 {
            0
        }

        fn call(&mut self, _caller: Address, target: Address, _call: Call) -> Result<Return> {
            Err(DexError::UnknownTarget(target))
        }
    }

    fn deployed() -> (Diamond<FactoryLayout>, Bare) {
        let mut host = Bare {
            ledger: MemoryLedger::new(),
        };
        let mut diamond = Diamond::new(Address::from_low_u64(100), OWNER);
        let cut = factory::standard_cut(FactoryConfig::new(OWNER));
        let Ok(()) = diamond.upgrade(&mut host, OWNER, cut) else {
            panic!("standard cut");
        };
        (diamond, host)
    }

    #[test]
    fn empty_diamond_knows_no_operation() {
        let mut host = Bare {
            ledger: MemoryLedger::new(),
        };
        let mut diamond: Diamond<FactoryLayout> = Diamond::new(Address::from_low_u64(100), OWNER);
        assert_eq!(
            diamond.execute(&mut host, OWNER, Call::Owner),
            Err(DexError::UnknownOperation(Selector::Owner))
        );
        assert!(diamond.facets().is_empty());
    }

    #[test]
    fn upgrade_is_owner_only_and_never_empty() {
        let (mut diamond, mut host) = deployed();
        let before = diamond.facet_addresses();
        assert_eq!(
            diamond.upgrade(&mut host, STRANGER, DiamondCut::new()),
            Err(DexError::unauthorized(Role::Owner, STRANGER))
        );
        assert_eq!(
            diamond.upgrade(&mut host, OWNER, DiamondCut::new()),
            Err(DexError::EmptyFacetCut)
        );
        assert_eq!(diamond.facet_addresses(), before);
    }

    #[test]
    fn second_init_fails_and_leaves_storage() {
        let (mut diamond, mut host) = deployed();
        let _ = diamond.take_events();
        let layout = diamond.layout().clone();
        let again = DiamondCut::new().with_init(
            Arc::new(FactoryInitFacet::new()),
            Call::InitFactory(FactoryConfig::new(STRANGER)),
        );
        assert_eq!(
            diamond.upgrade(&mut host, OWNER, again),
            Err(DexError::InitFailed(Box::new(DexError::AlreadyInitialized)))
        );
        assert_eq!(diamond.layout(), &layout);
        assert!(diamond.take_events().is_empty());
    }

    #[test]
    fn pause_checked_before_arguments() {
        let (mut diamond, mut host) = deployed();
        diamond.storage_mut().core_mut().set_paused(true);
        let same = Address::from_low_u64(7);
        let create = Call::CreatePair {
            token_a: same,
            token_b: same,
            swap_fee: BasisPoints::new(30),
            protocol_fee: BasisPoints::ZERO,
            admin: OWNER,
        };
        assert_eq!(
            diamond.execute(&mut host, OWNER, create),
            Err(DexError::OperationPaused)
        );
        let Ok(count) = diamond
            .execute(&mut host, STRANGER, Call::AllPairsLength)
            .and_then(Return::into_count)
        else {
            panic!("reads stay open");
        };
        assert_eq!(count, 0);
    }

    #[test]
    fn loupe_answers_unknown_inputs_with_empty_results() {
        let (mut diamond, mut host) = deployed();
        let Ok(Return::Selectors(selectors)) =
            diamond.execute(&mut host, STRANGER, Call::FacetSelectors { facet: STRANGER })
        else {
            panic!("facetSelectors");
        };
        assert!(selectors.is_empty());
        let Ok(owner_facet) = diamond
            .execute(&mut host, STRANGER, Call::FacetAddress { selector: Selector::CreatePair })
            .and_then(Return::into_address)
        else {
            panic!("facetAddress");
        };
        assert_eq!(Some(owner_facet), diamond.facet_address(Selector::CreatePair));
    }

    #[test]
    fn fee_setter_appointed_by_owner_only() {
        let (mut diamond, mut host) = deployed();
        assert_eq!(
            diamond.execute(&mut host, STRANGER, Call::SetFeeSetter { account: STRANGER }),
            Err(DexError::unauthorized(Role::Owner, STRANGER))
        );
        assert_eq!(
            diamond.execute(&mut host, OWNER, Call::SetFeeSetter { account: Address::ZERO }),
            Err(DexError::ZeroAddress)
        );
        let Ok(()) = diamond
            .execute(&mut host, OWNER, Call::SetFeeSetter { account: STRANGER })
            .and_then(Return::into_unit)
        else {
            panic!("setFeeSetter");
        };
        assert_eq!(diamond.layout().fee_setter(), STRANGER);
    }
}

//! In-process host for one factory, one router and a token ledger.
//!
//! [`Runtime`] plays the role of the execution environment: it owns both
//! diamonds, the ledger and the clock, and delivers one top-level
//! operation at a time.  Every top-level operation is all-or-nothing
//! across the whole world: both diamonds and the ledger are checkpointed
//! before it runs and restored if it fails at any depth.
//!
//! # Cost
//!
//! Checkpoints are full clones.  A top-level operation copies every pool,
//! the whole ledger and both event journals, and each nested diamond call
//! copies that diamond's storage once more, so every operation is linear
//! in the size of the world.  Draining events with
//! [`Runtime::take_events`] keeps the journals out of that cost.
//!
//! # Usage
//!
//! ```rust
//! use hydra_dex::config::{FactoryConfig, RouterConfig, RuntimeConfig};
//! use hydra_dex::diamond::Call;
//! use hydra_dex::domain::Address;
//! use hydra_dex::runtime::Runtime;
//!
//! let owner = Address::from_low_u64(1);
//! let config = RuntimeConfig::new(
//!     owner,
//!     1_700_000_000,
//!     FactoryConfig::new(owner),
//!     RouterConfig::existing_pairs_only(),
//! )
//! .expect("valid config");
//! let mut runtime = Runtime::bootstrap(&config).expect("bootstrap");
//!
//! let pairs = runtime
//!     .call_factory(owner, Call::AllPairsLength)
//!     .and_then(|r| r.into_count())
//!     .expect("count");
//! assert_eq!(pairs, 0);
//! ```

use tracing::{info, warn};

use crate::config::RuntimeConfig;
use crate::diamond::{Call, Diamond, DiamondCut, Return};
use crate::domain::{Address, Event};
use crate::error::{DexError, Result};
use crate::factory::{self, FactoryLayout};
use crate::ledger::MemoryLedger;
use crate::router::{self, RouterLayout};
use crate::traits::{Host, TokenLedger};

const DIAMOND_TAG: &[u8] = b"hydra-dex/diamond";

/// A factory diamond, a router diamond, a ledger and a clock.
#[derive(Debug, Clone)]
pub struct Runtime {
    factory: Diamond<FactoryLayout>,
    router: Diamond<RouterLayout>,
    ledger: MemoryLedger,
    now: u64,
}

/// Host view handed to an executing diamond.
///
/// A diamond that is currently executing has been taken out of its slot,
/// so a nested call back into it finds the slot empty.
struct Env<'w> {
    factory_address: Address,
    router_address: Address,
    factory: Option<&'w mut Diamond<FactoryLayout>>,
    router: Option<&'w mut Diamond<RouterLayout>>,
    ledger: &'w mut MemoryLedger,
    now: u64,
}

impl Host for Env<'_> {
    fn ledger(&mut self) -> &mut dyn TokenLedger {
        &mut *self.ledger
    }

    fn now(&self) -> u64 {
        self.now
    }

    fn call(&mut self, caller: Address, target: Address, call: Call) -> Result<Return> {
        if target == self.factory_address {
            let Some(factory) = self.factory.take() else {
                return Err(DexError::Reentrancy);
            };
            let outcome = {
                let mut nested = Env {
                    factory_address: self.factory_address,
                    router_address: self.router_address,
                    factory: None,
                    router: self.router.as_deref_mut(),
                    ledger: &mut *self.ledger,
                    now: self.now,
                };
                factory.execute(&mut nested, caller, call)
            };
            self.factory = Some(factory);
            outcome
        } else if target == self.router_address {
            let Some(router) = self.router.take() else {
                return Err(DexError::Reentrancy);
            };
            let outcome = {
                let mut nested = Env {
                    factory_address: self.factory_address,
                    router_address: self.router_address,
                    factory: self.factory.as_deref_mut(),
                    router: None,
                    ledger: &mut *self.ledger,
                    now: self.now,
                };
                router.execute(&mut nested, caller, call)
            };
            self.router = Some(router);
            outcome
        } else {
            Err(DexError::UnknownTarget(target))
        }
    }
}

impl Runtime {
    /// Deploys and wires a factory and a router.
    ///
    /// Both diamonds are owned by `config.owner()` and receive their
    /// standard facet sets through owner-signed upgrades with init calls.
    /// The router is then registered as a pair creator so that
    /// `addLiquidity` can create missing pairs.
    ///
    /// # Errors
    ///
    /// - Any [`RuntimeConfig::validate`] failure.
    /// - Any failure of the wiring upgrades.
    pub fn bootstrap(config: &RuntimeConfig) -> Result<Self> {
        config.validate()?;
        let owner = config.owner();
        let owner_bytes = owner.as_bytes();
        let factory_address =
            Address::derive(DIAMOND_TAG, &[b"factory".as_slice(), owner_bytes.as_slice()]);
        let router_address =
            Address::derive(DIAMOND_TAG, &[b"router".as_slice(), owner_bytes.as_slice()]);

        let mut runtime = Self {
            factory: Diamond::new(factory_address, owner),
            router: Diamond::new(router_address, owner),
            ledger: MemoryLedger::new(),
            now: config.genesis_timestamp(),
        };
        runtime.upgrade_factory(owner, factory::standard_cut(config.factory().clone()))?;
        runtime.upgrade_router(
            owner,
            router::standard_cut(factory_address, config.router().clone()),
        )?;
        runtime
            .call_factory(
                owner,
                Call::SetPairCreator {
                    account: router_address,
                    enabled: true,
                },
            )?
            .into_unit()?;
        info!(
            %owner,
            factory = %factory_address,
            router = %router_address,
            "runtime bootstrapped"
        );
        Ok(runtime)
    }

    /// Factory diamond.
    #[must_use]
    pub const fn factory(&self) -> &Diamond<FactoryLayout> {
        &self.factory
    }

    /// Router diamond.
    #[must_use]
    pub const fn router(&self) -> &Diamond<RouterLayout> {
        &self.router
    }

    /// Factory identity.
    #[must_use]
    pub const fn factory_address(&self) -> Address {
        self.factory.address()
    }

    /// Router identity.
    #[must_use]
    pub const fn router_address(&self) -> Address {
        self.router.address()
    }

    /// Token ledger.
    #[must_use]
    pub const fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    /// Token ledger, mutably; used to fund accounts and set allowances.
    pub fn ledger_mut(&mut self) -> &mut MemoryLedger {
        &mut self.ledger
    }

    /// Current clock value.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Sets the clock.
    pub fn set_time(&mut self, now: u64) {
        self.now = now;
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, seconds: u64) {
        self.now = self.now.saturating_add(seconds);
    }

    /// Runs one operation on the factory.
    ///
    /// # Errors
    ///
    /// Whatever the factory raises; the world is left untouched.
    pub fn call_factory(&mut self, caller: Address, call: Call) -> Result<Return> {
        self.on_factory(|factory, env| factory.execute(env, caller, call))
    }

    /// Runs one operation on the router.
    ///
    /// # Errors
    ///
    /// Whatever the router raises; the world is left untouched.
    pub fn call_router(&mut self, caller: Address, call: Call) -> Result<Return> {
        self.on_router(|router, env| router.execute(env, caller, call))
    }

    /// Upgrades the factory.
    ///
    /// # Errors
    ///
    /// Any [`Diamond::upgrade`] error; the world is left untouched.
    pub fn upgrade_factory(
        &mut self,
        caller: Address,
        cut: DiamondCut<FactoryLayout>,
    ) -> Result<()> {
        self.on_factory(|factory, env| factory.upgrade(env, caller, cut))
    }

    /// Upgrades the router.
    ///
    /// # Errors
    ///
    /// Any [`Diamond::upgrade`] error; the world is left untouched.
    pub fn upgrade_router(&mut self, caller: Address, cut: DiamondCut<RouterLayout>) -> Result<()> {
        self.on_router(|router, env| router.upgrade(env, caller, cut))
    }

    /// Drains both event journals, factory first.
    pub fn take_events(&mut self) -> Vec<(Address, Event)> {
        let factory = self.factory.address();
        let router = self.router.address();
        let mut events: Vec<(Address, Event)> = self
            .factory
            .take_events()
            .into_iter()
            .map(|e| (factory, e))
            .collect();
        events.extend(self.router.take_events().into_iter().map(|e| (router, e)));
        events
    }

    /// Runs `op` on the factory with the router reachable through the host.
    fn on_factory<T>(
        &mut self,
        op: impl FnOnce(&mut Diamond<FactoryLayout>, &mut dyn Host) -> Result<T>,
    ) -> Result<T> {
        let checkpoint = self.clone();
        let outcome = {
            let mut env = Env {
                factory_address: self.factory.address(),
                router_address: self.router.address(),
                factory: None,
                router: Some(&mut self.router),
                ledger: &mut self.ledger,
                now: self.now,
            };
            op(&mut self.factory, &mut env)
        };
        self.commit(checkpoint, outcome)
    }

    /// Runs `op` on the router with the factory reachable through the host.
    fn on_router<T>(
        &mut self,
        op: impl FnOnce(&mut Diamond<RouterLayout>, &mut dyn Host) -> Result<T>,
    ) -> Result<T> {
        let checkpoint = self.clone();
        let outcome = {
            let mut env = Env {
                factory_address: self.factory.address(),
                router_address: self.router.address(),
                factory: Some(&mut self.factory),
                router: None,
                ledger: &mut self.ledger,
                now: self.now,
            };
            op(&mut self.router, &mut env)
        };
        self.commit(checkpoint, outcome)
    }

    fn commit<T>(&mut self, checkpoint: Self, outcome: Result<T>) -> Result<T> {
        if let Err(e) = &outcome {
            warn!(error = %e, "top-level operation rolled back");
            *self = checkpoint;
        }
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{FactoryConfig, RouterConfig};

    const OWNER: Address = Address::from_low_u64(1);

    fn runtime() -> Runtime {
        let Ok(config) = RuntimeConfig::new(
            OWNER,
            100,
            FactoryConfig::new(OWNER),
            RouterConfig::existing_pairs_only(),
        ) else {
            panic!("valid config");
        };
        let Ok(runtime) = Runtime::bootstrap(&config) else {
            panic!("bootstrap");
        };
        runtime
    }

    #[test]
    fn bootstrap_links_router_to_factory() {
        let mut rt = runtime();
        assert_ne!(rt.factory_address(), rt.router_address());
        assert_eq!(rt.router().layout().factory(), rt.factory_address());
        assert!(rt.factory().layout().is_pair_creator(rt.router_address()));
        let Ok(linked) = rt.call_router(OWNER, Call::Factory).and_then(Return::into_address)
        else {
            panic!("factory()");
        };
        assert_eq!(linked, rt.factory_address());
        assert_eq!(rt.now(), 100);
    }

    #[test]
    fn unknown_target_from_host() {
        let mut rt = runtime();
        let stranger = Address::from_low_u64(404);
        let mut ledger = MemoryLedger::new();
        let mut env = Env {
            factory_address: rt.factory.address(),
            router_address: rt.router.address(),
            factory: Some(&mut rt.factory),
            router: None,
            ledger: &mut ledger,
            now: 0,
        };
        assert_eq!(
            env.call(OWNER, stranger, Call::Owner),
            Err(DexError::UnknownTarget(stranger))
        );
        assert_eq!(
            env.call(OWNER, rt.router.address(), Call::Owner),
            Err(DexError::Reentrancy)
        );
    }

    #[test]
    fn failed_call_restores_world() {
        let mut rt = runtime();
        let _ = rt.take_events();
        let before = rt.factory().layout().clone();
        let stranger = Address::from_low_u64(77);
        assert!(rt.call_factory(stranger, Call::Pause).is_err());
        assert_eq!(rt.factory().layout(), &before);
        assert!(!rt.factory().paused());
        assert!(rt.take_events().is_empty());
    }

    #[test]
    fn clock_moves() {
        let mut rt = runtime();
        rt.advance(50);
        assert_eq!(rt.now(), 150);
        rt.set_time(10);
        assert_eq!(rt.now(), 10);
    }
}

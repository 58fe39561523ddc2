//! Storage slots of the factory diamond.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{FactoryConfig, ProtocolFeePolicy};
use crate::diamond::Context;
use crate::domain::{Address, PairKey};
use crate::error::{DexError, Result, Role};
use crate::pools::Pair;
use crate::traits::Layout;

/// Everything the factory facets share: fee governance, pair-creation
/// rights and the pool registry with every pool's state.
///
/// # Registry invariants
///
/// - `lookup` holds both orderings of every registered pair and nothing
///   else.
/// - `all_pairs` lists every key of `pools` exactly once; removal
///   compacts it by moving the last entry into the gap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryLayout {
    initialized: bool,
    fee_setter: Address,
    fee_to: Address,
    policy: ProtocolFeePolicy,
    permissionless: bool,
    pair_creators: BTreeSet<Address>,
    pools: BTreeMap<Address, Pair>,
    lookup: BTreeMap<(Address, Address), Address>,
    all_pairs: Vec<Address>,
    nonce: u64,
}

impl Layout for FactoryLayout {
    const NAME: &'static str = "hydra-dex.factory";
    const VERSION: u16 = 1;
}

impl FactoryLayout {
    /// Whether the init call ran.
    #[must_use]
    pub const fn initialized(&self) -> bool {
        self.initialized
    }

    /// Protocol fee authority.
    #[must_use]
    pub const fn fee_setter(&self) -> Address {
        self.fee_setter
    }

    /// Protocol fee recipient.
    #[must_use]
    pub const fn fee_to(&self) -> Address {
        self.fee_to
    }

    /// Protocol-fee accrual policy.
    #[must_use]
    pub const fn protocol_fee_policy(&self) -> ProtocolFeePolicy {
        self.policy
    }

    /// Whether pools accrue protocol fees on their next liquidity event.
    #[must_use]
    pub fn protocol_fee_on(&self) -> bool {
        self.policy == ProtocolFeePolicy::Lazy && !self.fee_to.is_zero()
    }

    /// Whether `account` holds pair-creation rights.
    #[must_use]
    pub fn is_pair_creator(&self, account: Address) -> bool {
        self.pair_creators.contains(&account)
    }

    /// Whether anyone may create pairs.
    #[must_use]
    pub const fn permissionless(&self) -> bool {
        self.permissionless
    }

    /// Pool registered for two tokens, in either order.
    #[must_use]
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Option<Address> {
        self.lookup.get(&(token_a, token_b)).copied()
    }

    /// Pool state by identity.
    #[must_use]
    pub fn pair(&self, address: Address) -> Option<&Pair> {
        self.pools.get(&address)
    }

    /// Registered pools in registry order.
    #[must_use]
    pub fn all_pairs(&self) -> &[Address] {
        &self.all_pairs
    }

    /// Pool state by identity.
    ///
    /// # Errors
    ///
    /// [`DexError::UnknownPool`] if nothing is registered there.
    pub fn require_pair(&self, address: Address) -> Result<&Pair> {
        self.pools.get(&address).ok_or(DexError::UnknownPool(address))
    }

    /// Fails unless `caller` is the fee-setter.
    ///
    /// # Errors
    ///
    /// [`DexError::Unauthorized`] with [`Role::FeeSetter`].
    pub fn require_fee_setter(&self, caller: Address) -> Result<()> {
        if self.fee_setter.is_zero() || caller != self.fee_setter {
            return Err(DexError::unauthorized(Role::FeeSetter, caller));
        }
        Ok(())
    }

    pub(crate) fn initialize(&mut self, config: &FactoryConfig) {
        self.initialized = true;
        self.fee_setter = config.fee_setter();
        self.fee_to = config.fee_to();
        self.policy = config.protocol_fee_policy();
        self.permissionless = config.permissionless_pair_creation();
    }

    pub(crate) fn set_fee_setter(&mut self, account: Address) -> Address {
        std::mem::replace(&mut self.fee_setter, account)
    }

    pub(crate) fn set_fee_to(&mut self, account: Address) -> Address {
        std::mem::replace(&mut self.fee_to, account)
    }

    pub(crate) fn set_policy(&mut self, policy: ProtocolFeePolicy) {
        self.policy = policy;
    }

    pub(crate) fn set_pair_creator(&mut self, account: Address, enabled: bool) {
        if enabled {
            self.pair_creators.insert(account);
        } else {
            self.pair_creators.remove(&account);
        }
    }

    pub(crate) fn pair_mut(&mut self, address: Address) -> Result<&mut Pair> {
        self.pools
            .get_mut(&address)
            .ok_or(DexError::UnknownPool(address))
    }

    pub(crate) fn next_nonce(&mut self) -> u64 {
        self.nonce += 1;
        self.nonce
    }

    /// Registers `pair`, returning the new registry length.
    pub(crate) fn insert_pair(&mut self, pair: Pair) -> Result<usize> {
        let key = pair.key();
        let address = pair.address();
        if self.get_pair(key.token0(), key.token1()).is_some() || self.pools.contains_key(&address)
        {
            return Err(DexError::PairExists);
        }
        self.lookup.insert((key.token0(), key.token1()), address);
        self.lookup.insert((key.token1(), key.token0()), address);
        self.all_pairs.push(address);
        self.pools.insert(address, pair);
        Ok(self.all_pairs.len())
    }

    /// Delists a pool, returning its final state.
    pub(crate) fn remove_pair(&mut self, address: Address) -> Result<Pair> {
        let pair = self
            .pools
            .remove(&address)
            .ok_or(DexError::UnknownPool(address))?;
        let key: PairKey = pair.key();
        self.lookup.remove(&(key.token0(), key.token1()));
        self.lookup.remove(&(key.token1(), key.token0()));
        match self.all_pairs.iter().position(|a| *a == address) {
            Some(index) => {
                self.all_pairs.swap_remove(index);
            }
            None => return Err(DexError::InvariantViolation("pool missing from registry list")),
        }
        Ok(pair)
    }
}

/// Re-entrancy flag of one pool, for [`with_lock`](crate::diamond::guard::with_lock).
pub(crate) fn pool_lock<'c>(
    ctx: &'c mut Context<'_, FactoryLayout>,
    pair: Address,
) -> Result<&'c mut bool> {
    ctx.layout_mut().pair_mut(pair).map(Pair::lock_flag)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::PoolParams;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn pair(id: u64, a: u64, b: u64) -> Pair {
        let Ok(key) = PairKey::new(addr(a), addr(b)) else {
            panic!("distinct tokens");
        };
        Pair::new(addr(id), key, PoolParams::default(), addr(7), 0)
    }

    #[test]
    fn insert_records_both_orderings() {
        let mut layout = FactoryLayout::default();
        assert_eq!(layout.insert_pair(pair(100, 2, 1)), Ok(1));
        assert_eq!(layout.get_pair(addr(1), addr(2)), Some(addr(100)));
        assert_eq!(layout.get_pair(addr(2), addr(1)), Some(addr(100)));
        assert_eq!(layout.insert_pair(pair(101, 1, 2)), Err(DexError::PairExists));
    }

    #[test]
    fn removal_compacts_with_last() {
        let mut layout = FactoryLayout::default();
        for (id, a, b) in [(100, 1, 2), (101, 1, 3), (102, 2, 3)] {
            let Ok(_) = layout.insert_pair(pair(id, a, b)) else {
                panic!("insert");
            };
        }
        let Ok(removed) = layout.remove_pair(addr(100)) else {
            panic!("remove");
        };
        assert_eq!(removed.address(), addr(100));
        assert_eq!(layout.all_pairs(), &[addr(102), addr(101)]);
        assert_eq!(layout.get_pair(addr(1), addr(2)), None);
        assert_eq!(layout.get_pair(addr(2), addr(1)), None);
        assert_eq!(
            layout.remove_pair(addr(100)).map(|p| p.address()),
            Err(DexError::UnknownPool(addr(100)))
        );
    }

    #[test]
    fn protocol_fee_needs_recipient_and_lazy_policy() {
        let mut layout = FactoryLayout::default();
        assert!(!layout.protocol_fee_on());
        layout.initialize(&FactoryConfig::new(addr(1)).with_fee_to(addr(2)));
        assert!(layout.protocol_fee_on());
        layout.set_policy(ProtocolFeePolicy::Disabled);
        assert!(!layout.protocol_fee_on());
    }

    #[test]
    fn fee_setter_check() {
        let mut layout = FactoryLayout::default();
        assert!(layout.require_fee_setter(Address::ZERO).is_err());
        layout.initialize(&FactoryConfig::new(addr(1)));
        assert_eq!(layout.require_fee_setter(addr(1)), Ok(()));
        assert_eq!(
            layout.require_fee_setter(addr(2)),
            Err(DexError::unauthorized(Role::FeeSetter, addr(2)))
        );
    }
}

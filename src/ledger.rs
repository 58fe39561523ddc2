//! In-memory token ledger.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount};
use crate::error::{DexError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::TokenLedger;

/// [`TokenLedger`] backed by ordered maps.
///
/// Cheap to clone, which is how the runtime checkpoints it around each
/// top-level operation.  Zero balances and allowances are pruned so that
/// two ledgers holding the same value compare equal.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Address, Amount};
/// use hydra_dex::ledger::MemoryLedger;
/// use hydra_dex::traits::TokenLedger;
///
/// let token = Address::from_low_u64(0xA);
/// let alice = Address::from_low_u64(1);
/// let bob = Address::from_low_u64(2);
///
/// let mut ledger = MemoryLedger::new();
/// ledger.mint(token, alice, Amount::new(100)).expect("mint");
/// ledger.transfer(token, alice, bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(token, bob), Amount::new(40));
/// assert_eq!(ledger.total_supply(token), Amount::new(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    balances: BTreeMap<(Address, Address), Amount>,
    allowances: BTreeMap<(Address, Address, Address), Amount>,
    supplies: BTreeMap<Address, Amount>,
}

impl MemoryLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set_balance(&mut self, token: Address, holder: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(token, holder));
        } else {
            self.balances.insert((token, holder), amount);
        }
    }

    fn debit(&mut self, token: Address, holder: Address, amount: Amount) -> Result<()> {
        let balance = self.balance_of(token, holder);
        let remaining = balance
            .checked_sub(&amount)
            .ok_or(DexError::InsufficientBalance { token, holder })?;
        self.set_balance(token, holder, remaining);
        Ok(())
    }

    fn credit(&mut self, token: Address, holder: Address, amount: Amount) -> Result<()> {
        let balance = self.balance_of(token, holder).safe_add(&amount)?;
        self.set_balance(token, holder, balance);
        Ok(())
    }
}

impl TokenLedger for MemoryLedger {
    fn balance_of(&self, token: Address, holder: Address) -> Amount {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or_default()
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self, token: Address) -> Amount {
        self.supplies.get(&token).copied().unwrap_or_default()
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        if to.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        self.debit(token, from, amount)?;
        // cannot overflow: the supply bounds every balance
        self.credit(token, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let allowed = self.allowance(token, from, spender);
        let remaining = allowed
            .checked_sub(&amount)
            .ok_or(DexError::InsufficientAllowance { token, spender })?;
        self.transfer(token, from, to, amount)?;
        if remaining.is_zero() {
            self.allowances.remove(&(token, from, spender));
        } else {
            self.allowances.insert((token, from, spender), remaining);
        }
        Ok(())
    }

    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()> {
        if spender.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        if amount.is_zero() {
            self.allowances.remove(&(token, owner, spender));
        } else {
            self.allowances.insert((token, owner, spender), amount);
        }
        Ok(())
    }

    fn mint(&mut self, token: Address, to: Address, amount: Amount) -> Result<()> {
        let supply = self.total_supply(token).safe_add(&amount)?;
        self.credit(token, to, amount)?;
        self.supplies.insert(token, supply);
        Ok(())
    }

    fn burn(&mut self, token: Address, from: Address, amount: Amount) -> Result<()> {
        self.debit(token, from, amount)?;
        let supply = self.total_supply(token).safe_sub(&amount)?;
        if supply.is_zero() {
            self.supplies.remove(&token);
        } else {
            self.supplies.insert(token, supply);
        }
        Ok(())
    }
}

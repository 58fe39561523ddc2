//! Fungible-token interface consumed by pools and the router.

use crate::domain::{Address, Amount};
use crate::error::Result;

/// Balances, allowances and supplies of every fungible token, keyed by
/// token address.
///
/// Pools hold their reserves here under their own address, and a pool's
/// liquidity shares are a token whose address is the pool's identity.
///
/// # Semantics
///
/// - `transfer` and `transfer_from` move value between holders; the
///   latter also consumes `spender`'s allowance from `from`.
/// - `mint` and `burn` change supply; they are reserved to the token's
///   issuer (the pools, for liquidity shares) and unchecked here.
/// - Every failure leaves the ledger untouched.
pub trait TokenLedger {
    /// Balance of `holder` in `token`.
    fn balance_of(&self, token: Address, holder: Address) -> Amount;

    /// Amount `spender` may still move out of `owner`'s `token` balance.
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount;

    /// Total supply of `token`.
    fn total_supply(&self, token: Address) -> Amount;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAddress`](crate::error::DexError::ZeroAddress)
    ///   if `to` is the null address.
    /// - [`DexError::InsufficientBalance`](crate::error::DexError::InsufficientBalance)
    ///   if `from` holds too little.
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Moves `amount` of `token` from `from` to `to` using `spender`'s
    /// allowance.
    ///
    /// # Errors
    ///
    /// As [`TokenLedger::transfer`], plus
    /// [`DexError::InsufficientAllowance`](crate::error::DexError::InsufficientAllowance).
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Sets `spender`'s allowance over `owner`'s `token` balance.
    ///
    /// # Errors
    ///
    /// [`DexError::ZeroAddress`](crate::error::DexError::ZeroAddress) if
    /// `spender` is the null address.
    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Creates `amount` of `token` for `to`.
    ///
    /// # Errors
    ///
    /// [`DexError::Overflow`](crate::error::DexError::Overflow) past the
    /// representable supply.
    fn mint(&mut self, token: Address, to: Address, amount: Amount) -> Result<()>;

    /// Destroys `amount` of `token` held by `from`.
    ///
    /// # Errors
    ///
    /// [`DexError::InsufficientBalance`](crate::error::DexError::InsufficientBalance)
    /// if `from` holds too little.
    fn burn(&mut self, token: Address, from: Address, amount: Amount) -> Result<()>;
}

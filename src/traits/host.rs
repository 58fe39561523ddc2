//! The environment a diamond executes in.

use super::TokenLedger;
use crate::diamond::{Call, Return};
use crate::domain::Address;
use crate::error::Result;

/// Services the hosting environment provides to an executing diamond.
///
/// The host owns everything outside the diamond: the token ledger and
/// every other diamond.  A diamond that is currently executing is not
/// reachable through its own host, so a nested call back into it fails
/// with [`DexError::Reentrancy`](crate::error::DexError::Reentrancy).
pub trait Host {
    /// The fungible-token ledger.
    fn ledger(&mut self) -> &mut dyn TokenLedger;

    /// Timestamp of the current top-level operation.
    fn now(&self) -> u64;

    /// Runs `call` on the diamond at `target` on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownTarget`](crate::error::DexError::UnknownTarget)
    ///   if no diamond lives at `target`.
    /// - [`DexError::Reentrancy`](crate::error::DexError::Reentrancy) if
    ///   the target is already executing.
    /// - Any error raised by the target.
    fn call(&mut self, caller: Address, target: Address, call: Call) -> Result<Return>;
}

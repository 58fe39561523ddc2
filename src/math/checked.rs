//! `Result`-returning arithmetic for the quantity newtypes.
//!
//! The newtypes expose `Option`-returning `checked_*` methods; pool and
//! ledger code wants `?`, so [`CheckedArithmetic`] maps each failure to the
//! matching [`DexError`] variant.  Products and quotients of quantities go
//! through the 256-bit helpers in [`wide`](super::wide) instead.
//!
//! # Examples
//!
//! ```
//! use hydra_dex::domain::Amount;
//! use hydra_dex::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200));
//! assert_eq!(sum, Ok(Amount::new(300)));
//! assert!(Amount::new(1).safe_sub(&Amount::new(2)).is_err());
//! ```

use crate::domain::{Amount, Liquidity};
use crate::error::{DexError, Result};

/// Fallible arithmetic for quantity newtypes.
///
/// Never saturates and never panics: overflow and underflow each surface
/// as their own error variant.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] past the representable range.
    fn safe_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(DexError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(DexError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(DexError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(DexError::Underflow("liquidity subtraction underflow"))
    }
}

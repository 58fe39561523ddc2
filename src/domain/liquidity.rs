//! Liquidity-share quantities.

use core::fmt;

use super::Amount;

/// A quantity of a pool's liquidity shares.
///
/// Shares are fungible and transferable: the ledger tracks them under the
/// pool's [`Address`](super::Address), exactly like any other token.  This
/// type exists so share arithmetic cannot be mixed up with token amounts
/// by accident; convert explicitly with [`Liquidity::as_amount`] when
/// crossing into the ledger.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, Liquidity};
///
/// let minted = Liquidity::new(1_000);
/// assert_eq!(minted.as_amount(), Amount::new(1_000));
/// assert_eq!(minted.checked_add(&Liquidity::new(1)), Some(Liquidity::new(1_001)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Liquidity(u128);

impl Liquidity {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The same quantity as a ledger amount.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }

    /// Shares held as a ledger balance.
    pub const fn from_amount(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_default() {
        assert!(Liquidity::ZERO.is_zero());
        assert_eq!(Liquidity::default(), Liquidity::ZERO);
        assert!(!Liquidity::new(1).is_zero());
    }

    #[test]
    fn add_sub() {
        let a = Liquidity::new(300);
        let b = Liquidity::new(100);
        assert_eq!(a.checked_add(&b), Some(Liquidity::new(400)));
        assert_eq!(a.checked_sub(&b), Some(Liquidity::new(200)));
        assert_eq!(b.checked_sub(&a), None);
        assert_eq!(Liquidity::new(u128::MAX).checked_add(&Liquidity::new(1)), None);
    }

    #[test]
    fn amount_conversion_is_lossless() {
        let l = Liquidity::new(12_345);
        assert_eq!(Liquidity::from_amount(l.as_amount()), l);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Liquidity::new(1_000)), "1000");
    }
}

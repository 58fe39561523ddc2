//! Raw token amount with checked arithmetic.

use core::fmt;

/// A raw token amount in the token's smallest unit.
///
/// Token balances, reserves and swap legs are all `Amount`s.  Decimals are
/// never interpreted here; fixtures use [`Amount::from_units`] to express
/// whole tokens with 18 decimals.
///
/// Addition and subtraction are checked: they return `None` on overflow
/// or underflow instead of panicking.  The
/// [`CheckedArithmetic`](crate::math::CheckedArithmetic) trait lifts them
/// into `Result`s.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(a.checked_sub(&b), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// `whole × 10¹⁸`, saturating at [`Amount::MAX`].
    pub const fn from_units(whole: u128) -> Self {
        Self(whole.saturating_mul(1_000_000_000_000_000_000))
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
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

    /// Subtraction clamped at zero.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_and_default() {
        assert_eq!(Amount::ZERO.get(), 0);
        assert_eq!(Amount::MAX.get(), u128::MAX);
        assert_eq!(Amount::default(), Amount::ZERO);
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn from_units_scales_by_eighteen_decimals() {
        assert_eq!(Amount::from_units(1).get(), 1_000_000_000_000_000_000);
        assert_eq!(Amount::from_units(500).get(), 500 * 10u128.pow(18));
        assert_eq!(Amount::from_units(u128::MAX), Amount::MAX);
    }

    #[test]
    fn add_and_overflow() {
        assert_eq!(
            Amount::new(100).checked_add(&Amount::new(200)),
            Some(Amount::new(300))
        );
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn sub_and_underflow() {
        assert_eq!(
            Amount::new(300).checked_sub(&Amount::new(100)),
            Some(Amount::new(200))
        );
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
        assert_eq!(Amount::new(1).saturating_sub(&Amount::new(2)), Amount::ZERO);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Amount::new(1_000_000)), "1000000");
    }
}

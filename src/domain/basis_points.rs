//! Basis-point representation for fees.

use core::fmt;

/// Denominator of every fee computation (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Pools carry two of these: the swap fee charged on every input, and the
/// protocol fee, which is the protocol's share *of the swap fee* (not of
/// the trade).
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::BasisPoints;
///
/// let fee = BasisPoints::new(30);
/// assert_eq!(fee.complement(), 9_970);
/// assert!(fee.is_valid_percent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// `10_000 − self`, clamped at zero.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        BPS_DENOMINATOR.saturating_sub(self.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(BasisPoints::ZERO.get(), 0);
        assert_eq!(BasisPoints::MAX_PERCENT.get(), 10_000);
        assert_eq!(BasisPoints::default(), BasisPoints::ZERO);
    }

    #[test]
    fn validity_range() {
        assert!(BasisPoints::MAX_PERCENT.is_valid_percent());
        assert!(!BasisPoints::new(10_001).is_valid_percent());
    }

    #[test]
    fn complement_clamps() {
        assert_eq!(BasisPoints::new(3).complement(), 9_997);
        assert_eq!(BasisPoints::MAX_PERCENT.complement(), 0);
        assert_eq!(BasisPoints::new(20_000).complement(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", BasisPoints::new(30)), "30bp");
    }
}

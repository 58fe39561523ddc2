//! Fee parameters of a constant-product pool.

use crate::domain::BasisPoints;
use crate::error::{DexError, Result};

/// Fee parameters fixed at pool creation and adjustable afterwards by the
/// pool admin (swap fee) or the fee-setter (protocol fee).
///
/// # Validation
///
/// - `swap_fee` must be strictly below 100%, otherwise no input would
///   ever reach the pricing formula.
/// - `protocol_fee` is a share *of the swap fee* and may be at most 100%.
///
/// # Examples
///
/// ```
/// use hydra_dex::config::PoolParams;
/// use hydra_dex::domain::BasisPoints;
///
/// let params = PoolParams::new(BasisPoints::new(3), BasisPoints::new(3));
/// assert!(params.is_ok());
/// assert!(PoolParams::new(BasisPoints::new(10_000), BasisPoints::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolParams {
    swap_fee: BasisPoints,
    protocol_fee: BasisPoints,
}

impl PoolParams {
    /// Creates validated pool parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if either fee is out of range.
    pub fn new(swap_fee: BasisPoints, protocol_fee: BasisPoints) -> Result<Self> {
        let params = Self {
            swap_fee,
            protocol_fee,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates both fee ranges.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if either fee is out of range.
    pub fn validate(&self) -> Result<()> {
        validate_swap_fee(self.swap_fee)?;
        validate_protocol_fee(self.protocol_fee)
    }

    /// Fee charged on every swap input.
    #[must_use]
    pub const fn swap_fee(&self) -> BasisPoints {
        self.swap_fee
    }

    /// Protocol share of the swap fee.
    #[must_use]
    pub const fn protocol_fee(&self) -> BasisPoints {
        self.protocol_fee
    }

    pub(crate) fn set_swap_fee(&mut self, fee: BasisPoints) -> Result<()> {
        validate_swap_fee(fee)?;
        self.swap_fee = fee;
        Ok(())
    }

    pub(crate) fn set_protocol_fee(&mut self, fee: BasisPoints) -> Result<()> {
        validate_protocol_fee(fee)?;
        self.protocol_fee = fee;
        Ok(())
    }
}

impl Default for PoolParams {
    /// 0.30% swap fee, one sixth of it to the protocol.
    fn default() -> Self {
        Self {
            swap_fee: BasisPoints::new(30),
            protocol_fee: BasisPoints::new(1_667),
        }
    }
}

fn validate_swap_fee(fee: BasisPoints) -> Result<()> {
    if fee >= BasisPoints::MAX_PERCENT {
        return Err(DexError::InvalidFee("swap fee must be below 100%"));
    }
    Ok(())
}

fn validate_protocol_fee(fee: BasisPoints) -> Result<()> {
    if !fee.is_valid_percent() {
        return Err(DexError::InvalidFee("protocol fee must be at most 100%"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_params() {
        let Ok(p) = PoolParams::new(BasisPoints::new(3), BasisPoints::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(p.swap_fee(), BasisPoints::new(3));
        assert_eq!(p.protocol_fee(), BasisPoints::new(3));
    }

    #[test]
    fn swap_fee_of_one_hundred_percent_rejected() {
        let Err(DexError::InvalidFee(_)) =
            PoolParams::new(BasisPoints::MAX_PERCENT, BasisPoints::ZERO)
        else {
            panic!("expected InvalidFee");
        };
    }

    #[test]
    fn protocol_fee_may_take_whole_swap_fee() {
        assert!(PoolParams::new(BasisPoints::new(30), BasisPoints::MAX_PERCENT).is_ok());
        assert!(PoolParams::new(BasisPoints::new(30), BasisPoints::new(10_001)).is_err());
    }

    #[test]
    fn setters_validate() {
        let mut p = PoolParams::default();
        assert!(p.validate().is_ok());
        assert!(p.set_swap_fee(BasisPoints::new(20_000)).is_err());
        assert_eq!(p.swap_fee(), BasisPoints::new(30));
        assert!(p.set_protocol_fee(BasisPoints::ZERO).is_ok());
        assert_eq!(p.protocol_fee(), BasisPoints::ZERO);
    }
}

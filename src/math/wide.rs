//! 256-bit intermediates for reserve products and price accumulators.
//!
//! Reserves are capped at 112 bits, so the product of two reserves (or a
//! reserve times a basis-point factor squared) always fits in a [`U256`].
//! Results are narrowed back to `u128` explicitly, failing with
//! [`DexError::Overflow`] instead of truncating.

use ethereum_types::U256;

use crate::domain::Rounding;
use crate::error::{DexError, Result};

/// `2¹¹² − 1`, the largest reserve a pool may hold.
pub const MAX_RESERVE: u128 = (1u128 << 112) - 1;

/// Widens a `u128`.
#[inline]
#[must_use]
pub fn wide(value: u128) -> U256 {
    U256::from(value)
}

/// `a × b` without overflow.
#[inline]
#[must_use]
pub fn product(a: u128, b: u128) -> U256 {
    wide(a).saturating_mul(wide(b))
}

/// Floor square root.
#[inline]
#[must_use]
pub fn sqrt(value: U256) -> U256 {
    value.integer_sqrt()
}

/// Narrows a `U256` back to `u128`.
///
/// # Errors
///
/// Returns [`DexError::Overflow`] with `context` if `value` does not fit.
pub fn narrow(value: U256, context: &'static str) -> Result<u128> {
    if value > wide(u128::MAX) {
        return Err(DexError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// `a × b / denominator` computed in 256 bits.
///
/// # Errors
///
/// - [`DexError::DivisionByZero`] if `denominator` is zero.
/// - [`DexError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(DexError::DivisionByZero);
    }
    let numerator = product(a, b);
    let d = wide(denominator);
    let mut quotient = numerator / d;
    if rounding.is_up() && !(numerator % d).is_zero() {
        quotient = quotient
            .checked_add(U256::one())
            .ok_or(DexError::Overflow("mul_div rounding overflow"))?;
    }
    narrow(quotient, "mul_div result exceeds u128")
}

/// `Q112` encoding of `numerator / denominator`, the spot price format of
/// the cumulative price accumulators.
///
/// Returns zero when `denominator` is zero.
#[must_use]
pub fn q112_ratio(numerator: u128, denominator: u128) -> U256 {
    if denominator == 0 {
        return U256::zero();
    }
    (wide(numerator) << 112) / wide(denominator)
}

/// Advances an accumulator by `price × elapsed`, wrapping on overflow.
#[must_use]
pub fn accumulate(accumulator: U256, price: U256, elapsed: u64) -> U256 {
    let (increment, _) = price.overflowing_mul(U256::from(elapsed));
    let (sum, _) = accumulator.overflowing_add(increment);
    sum
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn product_of_max_reserves_fits() {
        let p = product(MAX_RESERVE, MAX_RESERVE);
        assert!(p < U256::MAX);
        assert_eq!(sqrt(p), wide(MAX_RESERVE));
    }

    #[test]
    fn sqrt_of_squares() {
        assert_eq!(sqrt(wide(0)), wide(0));
        assert_eq!(sqrt(wide(1)), wide(1));
        assert_eq!(sqrt(product(500, 500)), wide(500));
        assert_eq!(sqrt(wide(99)), wide(9));
    }

    #[test]
    fn mul_div_rounds() {
        assert_eq!(mul_div(10, 10, 3, Rounding::Down), Ok(33));
        assert_eq!(mul_div(10, 10, 3, Rounding::Up), Ok(34));
        assert_eq!(mul_div(u128::MAX, 2, 2, Rounding::Down), Ok(u128::MAX));
    }

    #[test]
    fn mul_div_errors() {
        assert_eq!(
            mul_div(1, 1, 0, Rounding::Down),
            Err(DexError::DivisionByZero)
        );
        let Err(DexError::Overflow(_)) = mul_div(u128::MAX, 3, 2, Rounding::Down) else {
            panic!("expected Overflow");
        };
    }

    #[test]
    fn narrow_bounds() {
        assert_eq!(narrow(wide(u128::MAX), "x"), Ok(u128::MAX));
        assert!(narrow(wide(u128::MAX) + U256::one(), "x").is_err());
    }

    #[test]
    fn q112_ratio_of_equal_reserves_is_one() {
        assert_eq!(q112_ratio(500, 500), U256::one() << 112);
        assert_eq!(q112_ratio(1, 0), U256::zero());
    }

    #[test]
    fn accumulate_wraps() {
        let near_max = U256::MAX - U256::from(4u64);
        let wrapped = accumulate(near_max, U256::from(5u64), 2);
        assert_eq!(wrapped, U256::from(5u64));
    }
}

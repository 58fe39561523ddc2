//! Stateless constant-product pricing.
//!
//! These are the formulas the router quotes with and the pools enforce.
//! Fees are taken from the input before pricing, all divisions round in
//! the pool's favour, and every product runs in 256 bits.
//!
//! # Exact input
//!
//! ```text
//! in_with_fee = amount_in × (10 000 − fee)
//! amount_out  = in_with_fee × reserve_out / (reserve_in × 10 000 + in_with_fee)
//! ```
//!
//! # Exact output
//!
//! ```text
//! amount_in = reserve_in × amount_out × 10 000
//!             / ((reserve_out − amount_out) × (10 000 − fee)) + 1
//! ```

use ethereum_types::U256;

use crate::domain::{Amount, BPS_DENOMINATOR, BasisPoints, Rounding};
use crate::error::{DexError, Result};
use crate::math::{mul_div, narrow, wide};

/// Reserves and fee of one hop along a swap path, oriented in the
/// direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    /// Reserve of the token entering the pool.
    pub reserve_in: Amount,
    /// Reserve of the token leaving the pool.
    pub reserve_out: Amount,
    /// The pool's swap fee.
    pub fee: BasisPoints,
}

/// Amount of token B worth `amount_a` of token A at the reserve ratio.
///
/// # Errors
///
/// - [`DexError::InsufficientAmount`] if `amount_a` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is zero.
/// - [`DexError::Overflow`] if the quote does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Amount;
/// use hydra_dex::pools::quote;
///
/// let b = quote(Amount::new(10), Amount::new(100), Amount::new(400));
/// assert_eq!(b, Ok(Amount::new(40)));
/// ```
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    if amount_a.is_zero() {
        return Err(DexError::InsufficientAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(DexError::InsufficientLiquidity);
    }
    mul_div(amount_a.get(), reserve_b.get(), reserve_a.get(), Rounding::Down).map(Amount::new)
}

/// Output of selling exactly `amount_in`.
///
/// # Errors
///
/// - [`DexError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is zero.
/// - [`DexError::InvalidFee`] if `fee` is 100% or more.
/// - [`DexError::Overflow`] if an intermediate exceeds 256 bits or the
///   output exceeds `u128`.
pub fn amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: BasisPoints,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(DexError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(DexError::InsufficientLiquidity);
    }
    let keep = fee_complement(fee)?;
    let in_with_fee = mul(wide(amount_in.get()), keep, "amount out input overflow")?;
    let numerator = mul(in_with_fee, wide(reserve_out.get()), "amount out numerator overflow")?;
    let denominator = mul(wide(reserve_in.get()), bps(), "amount out denominator overflow")?
        .checked_add(in_with_fee)
        .ok_or(DexError::Overflow("amount out denominator overflow"))?;
    narrow(numerator / denominator, "amount out exceeds u128").map(Amount::new)
}

/// Input needed to buy exactly `amount_out`.
///
/// # Errors
///
/// - [`DexError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out` would drain the output reserve.
/// - [`DexError::InvalidFee`] if `fee` is 100% or more.
/// - [`DexError::Overflow`] if an intermediate exceeds 256 bits or the
///   input exceeds `u128`.
pub fn amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: BasisPoints,
) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(DexError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(DexError::InsufficientLiquidity);
    }
    let keep = fee_complement(fee)?;
    let scaled_out = mul(wide(amount_out.get()), bps(), "amount in numerator overflow")?;
    let numerator = mul(wide(reserve_in.get()), scaled_out, "amount in numerator overflow")?;
    let remaining = reserve_out.get().saturating_sub(amount_out.get());
    let denominator = mul(wide(remaining), keep, "amount in denominator overflow")?;
    let quotient = (numerator / denominator)
        .checked_add(U256::one())
        .ok_or(DexError::Overflow("amount in exceeds u128"))?;
    narrow(quotient, "amount in exceeds u128").map(Amount::new)
}

/// Chains [`amount_out`] along `hops`.
///
/// The result starts with `amount_in` and has one more entry than `hops`.
///
/// # Errors
///
/// [`DexError::InvalidPath`] for an empty route, otherwise as
/// [`amount_out`].
pub fn amounts_out(amount_in: Amount, hops: &[Hop]) -> Result<Vec<Amount>> {
    if hops.is_empty() {
        return Err(DexError::InvalidPath);
    }
    let mut amounts = Vec::with_capacity(hops.len() + 1);
    amounts.push(amount_in);
    let mut current = amount_in;
    for hop in hops {
        current = amount_out(current, hop.reserve_in, hop.reserve_out, hop.fee)?;
        amounts.push(current);
    }
    Ok(amounts)
}

/// Chains [`amount_in`] backwards along `hops`.
///
/// The result ends with `amount_out` and has one more entry than `hops`.
///
/// # Errors
///
/// [`DexError::InvalidPath`] for an empty route, otherwise as
/// [`amount_in`].
pub fn amounts_in(amount_out: Amount, hops: &[Hop]) -> Result<Vec<Amount>> {
    if hops.is_empty() {
        return Err(DexError::InvalidPath);
    }
    let mut amounts = Vec::with_capacity(hops.len() + 1);
    amounts.push(amount_out);
    let mut current = amount_out;
    for hop in hops.iter().rev() {
        current = amount_in(current, hop.reserve_in, hop.reserve_out, hop.fee)?;
        amounts.push(current);
    }
    amounts.reverse();
    Ok(amounts)
}

fn mul(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(DexError::Overflow(context))
}

fn bps() -> U256 {
    U256::from(BPS_DENOMINATOR)
}

fn fee_complement(fee: BasisPoints) -> Result<U256> {
    match fee.complement() {
        0 => Err(DexError::InvalidFee("swap fee must be below 100%")),
        keep => Ok(U256::from(keep)),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const FEE_30: BasisPoints = BasisPoints::new(30);

    fn amt(v: u128) -> Amount {
        Amount::new(v)
    }

    #[test]
    fn quote_is_proportional() {
        assert_eq!(quote(amt(1), amt(3), amt(10)), Ok(amt(3)));
        assert_eq!(
            quote(Amount::ZERO, amt(1), amt(1)),
            Err(DexError::InsufficientAmount)
        );
        assert_eq!(
            quote(amt(1), Amount::ZERO, amt(1)),
            Err(DexError::InsufficientLiquidity)
        );
    }

    #[test]
    fn amount_out_matches_reference_values() {
        // 1000 in against 100_000/100_000 at 30 bp
        // in_with_fee = 9_970_000; out = 9_970_000 * 100_000 / (1_000_000_000 + 9_970_000)
        assert_eq!(
            amount_out(amt(1_000), amt(100_000), amt(100_000), FEE_30),
            Ok(amt(987))
        );
    }

    #[test]
    fn amount_out_zero_fee_is_pure_curve() {
        assert_eq!(
            amount_out(amt(100), amt(100), amt(100), BasisPoints::ZERO),
            Ok(amt(50))
        );
    }

    #[test]
    fn amount_out_rejections() {
        assert_eq!(
            amount_out(Amount::ZERO, amt(1), amt(1), FEE_30),
            Err(DexError::InsufficientInputAmount)
        );
        assert_eq!(
            amount_out(amt(1), amt(1), Amount::ZERO, FEE_30),
            Err(DexError::InsufficientLiquidity)
        );
        let Err(DexError::InvalidFee(_)) =
            amount_out(amt(1), amt(1), amt(1), BasisPoints::MAX_PERCENT)
        else {
            panic!("expected InvalidFee");
        };
    }

    #[test]
    fn amount_in_covers_amount_out() {
        let Ok(needed) = amount_in(amt(987), amt(100_000), amt(100_000), FEE_30) else {
            panic!("expected Ok");
        };
        let Ok(got) = amount_out(needed, amt(100_000), amt(100_000), FEE_30) else {
            panic!("expected Ok");
        };
        assert!(got >= amt(987));
        assert!(needed <= amt(1_000));
    }

    #[test]
    fn amount_in_cannot_drain_reserve() {
        assert_eq!(
            amount_in(amt(100), amt(100), amt(100), FEE_30),
            Err(DexError::InsufficientLiquidity)
        );
        assert_eq!(
            amount_in(Amount::ZERO, amt(100), amt(100), FEE_30),
            Err(DexError::InsufficientOutputAmount)
        );
    }

    #[test]
    fn chained_quotes() {
        let hops = [
            Hop {
                reserve_in: amt(100_000),
                reserve_out: amt(100_000),
                fee: FEE_30,
            },
            Hop {
                reserve_in: amt(50_000),
                reserve_out: amt(200_000),
                fee: BasisPoints::new(5),
            },
        ];
        let Ok(out) = amounts_out(amt(1_000), &hops) else {
            panic!("expected Ok");
        };
        assert_eq!(out.len(), 3);
        assert_eq!(out.first(), Some(&amt(1_000)));
        assert_eq!(out.get(1), Some(&amt(987)));

        let Some(&last) = out.last() else {
            panic!("non-empty");
        };
        let Ok(back) = amounts_in(last, &hops) else {
            panic!("expected Ok");
        };
        assert_eq!(back.last(), Some(&last));
        assert!(back.first().is_some_and(|first| *first <= amt(1_000)));
    }

    #[test]
    fn oversized_reserves_fail_instead_of_panicking() {
        let Err(DexError::Overflow(_)) = amount_out(Amount::MAX, Amount::MAX, Amount::MAX, FEE_30)
        else {
            panic!("expected Overflow");
        };
        let Err(DexError::Overflow(_)) =
            amount_in(Amount::new(u128::MAX - 1), Amount::MAX, Amount::MAX, FEE_30)
        else {
            panic!("expected Overflow");
        };
        let hops = [Hop {
            reserve_in: Amount::MAX,
            reserve_out: Amount::MAX,
            fee: FEE_30,
        }];
        assert!(amounts_out(Amount::MAX, &hops).is_err());
        assert!(amounts_in(Amount::new(u128::MAX - 1), &hops).is_err());
    }

    #[test]
    fn empty_route_rejected() {
        assert_eq!(amounts_out(amt(1), &[]), Err(DexError::InvalidPath));
        assert_eq!(amounts_in(amt(1), &[]), Err(DexError::InvalidPath));
    }
}

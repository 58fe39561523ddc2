//! Arithmetic utilities for pool and router calculations.
//!
//! - [`CheckedArithmetic`] lifts the newtypes' checked additions and
//!   subtractions into `Result`s.
//! - The `wide` helpers run reserve products, ratios, square roots and
//!   price accumulators in 256 bits.
//!
//! # Rounding convention
//!
//! Pools always round in their own favour:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal, minted shares | [`Rounding::Down`] |
//! | Required swap input | [`Rounding::Up`] |
//!
//! [`Rounding::Down`]: crate::domain::Rounding::Down
//! [`Rounding::Up`]: crate::domain::Rounding::Up

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{MAX_RESERVE, accumulate, mul_div, narrow, product, q112_ratio, sqrt, wide};

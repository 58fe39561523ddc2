//! Constant-product pools and their pricing formulas.
//!
//! | Item | Role |
//! |------|------|
//! | [`Pair`] | Reserves, share supply and price oracle of one pool |
//! | [`quote()`], [`amount_out`], [`amount_in`] | Stateless pricing used by the router |
//! | [`amounts_out`], [`amounts_in`] | The same chained along a multi-hop route |
//!
//! Pools live inside the factory's storage layout; this module only knows
//! their arithmetic.  Moving tokens and enforcing roles is the job of the
//! facets in [`factory`](crate::factory).

mod pair;
mod quote;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use pair::{BurnOutcome, MINIMUM_LIQUIDITY, MintOutcome, Pair, PairInfo, Reserves, SwapOutcome};
pub use quote::{Hop, amount_in, amount_out, amounts_in, amounts_out, quote};

//! Fundamental value types shared by every diamond and facet.
//!
//! Addresses identify accounts, tokens, pools, facets and diamonds alike.
//! Quantities are newtypes over `u128` with checked arithmetic; fee rates
//! are basis points.  Operation identifiers ([`Selector`]) and the
//! [`Event`] journal entries also live here because both diamonds share
//! them.

mod address;
mod amount;
mod basis_points;
mod event;
mod liquidity;
mod pair_key;
mod rounding;
mod selector;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::{BPS_DENOMINATOR, BasisPoints};
pub use event::Event;
pub use liquidity::Liquidity;
pub use pair_key::{PairKey, sort_tokens};
pub use rounding::Rounding;
pub use selector::Selector;

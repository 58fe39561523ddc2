//! Seams between diamonds, facets and their environment.
//!
//! - [`Layout`]: the shared storage layout of one diamond kind.
//! - [`Facet`]: an execution module behind the dispatch table.
//! - [`Host`]: what a diamond may reach outside itself.
//! - [`TokenLedger`]: the consumed fungible-token interface.

mod facet;
mod host;
mod layout;
mod token_ledger;

pub use facet::Facet;
pub use host::Host;
pub use layout::Layout;
pub use token_ledger::TokenLedger;

//! Facets every diamond carries, whatever its layout.
//!
//! | Facet | Operations |
//! |-------|------------|
//! | [`LoupeFacet`] | `facets`, `facetFunctionSelectors`, `facetAddresses`, `facetAddress` |
//! | [`OwnershipFacet`] | `owner`, `transferOwnership` |
//! | [`PausableFacet`] | `paused`, `pause`, `unpause`, `setGuardian`, `isGuardian` |
//!
//! They only touch [`CoreSlots`](crate::diamond::CoreSlots) and the
//! dispatch table, so they implement [`Facet`](crate::traits::Facet) for
//! every [`Layout`](crate::traits::Layout).

/// Declares a facet struct with a derived default address.
macro_rules! facet_identity {
    ($(#[$doc:meta])* $ty:ident, $name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $ty {
            address: $crate::domain::Address,
        }

        impl $ty {
            /// Facet name, also the seed of its default address.
            pub const NAME: &'static str = $name;

            /// The facet at its default address.
            #[must_use]
            pub fn new() -> Self {
                Self {
                    address: $crate::facets::facet_address(Self::NAME),
                }
            }

            /// The same facet deployed at another address.
            #[must_use]
            pub const fn at(address: $crate::domain::Address) -> Self {
                Self { address }
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

pub(crate) use facet_identity;

mod loupe;
mod ownership;
mod pausable;

pub use loupe::LoupeFacet;
pub use ownership::OwnershipFacet;
pub use pausable::PausableFacet;

use crate::domain::Address;

/// Deterministic facet identity derived from a facet name.
///
/// Distinct names give distinct addresses; redeploying a facet under a new
/// name (for example with a version suffix) gives it a new identity.
#[must_use]
pub fn facet_address(name: &str) -> Address {
    Address::derive(b"hydra-dex/facet", &[name.as_bytes()])
}

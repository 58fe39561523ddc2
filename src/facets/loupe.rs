//! Introspection of a diamond's dispatch table.

use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Selector};
use crate::error::{DexError, Result};
use crate::traits::{Facet, Layout};

super::facet_identity!(
    /// Answers which facets exist and which selectors they own.
    ///
    /// Pure reads; unknown inputs yield empty results, never errors.
    LoupeFacet,
    "diamond-loupe"
);

const SELECTORS: &[Selector] = &[
    Selector::Facets,
    Selector::FacetSelectors,
    Selector::FacetAddresses,
    Selector::FacetAddress,
];

impl<L: Layout> Facet<L> for LoupeFacet {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn selectors(&self) -> &'static [Selector] {
        SELECTORS
    }

    fn execute(&self, ctx: &mut Context<'_, L>, call: Call) -> Result<Return> {
        let table = ctx.storage().dispatch();
        match call {
            Call::Facets => Ok(Return::Facets(table.facets())),
            Call::FacetSelectors { facet } => Ok(Return::Selectors(table.facet_selectors(facet))),
            Call::FacetAddresses => Ok(Return::Addresses(table.facet_addresses())),
            Call::FacetAddress { selector } => Ok(Return::Address(
                table.facet_address(selector).unwrap_or(Address::ZERO),
            )),
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

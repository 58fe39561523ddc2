//! Read-only quotes.

use super::RouterLayout;
use super::route;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Selector};
use crate::error::{DexError, Result};
use crate::facets::facet_identity;
use crate::pools::{amounts_in, amounts_out, quote};
use crate::traits::Facet;

facet_identity!(
    /// `factory`, `getAmountsOut`, `getAmountsIn` and `quote`.
    ///
    /// None of these touch state, so they stay available while the
    /// router or the factory is paused.
    QuoteRouterFacet,
    "router-quote"
);

const SELECTORS: &[Selector] = &[
    Selector::Factory,
    Selector::GetAmountsOut,
    Selector::GetAmountsIn,
    Selector::Quote,
];

impl Facet<RouterLayout> for QuoteRouterFacet {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn selectors(&self) -> &'static [Selector] {
        SELECTORS
    }

    fn execute(&self, ctx: &mut Context<'_, RouterLayout>, call: Call) -> Result<Return> {
        match call {
            Call::Factory => Ok(Return::Address(ctx.layout().factory())),
            Call::GetAmountsOut { amount_in, path } => {
                let legs = route::resolve(ctx, &path)?;
                Ok(Return::Amounts(amounts_out(amount_in, &route::hops(&legs))?))
            }
            Call::GetAmountsIn { amount_out, path } => {
                let legs = route::resolve(ctx, &path)?;
                Ok(Return::Amounts(amounts_in(amount_out, &route::hops(&legs))?))
            }
            Call::Quote {
                amount_a,
                reserve_a,
                reserve_b,
            } => Ok(Return::Amount(quote(amount_a, reserve_a, reserve_b)?)),
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

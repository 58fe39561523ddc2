//! Multi-hop swaps.

use tracing::debug;

use super::RouterLayout;
use super::route::{self, Ctx, Leg};
use crate::diamond::{Call, Context, Return, SwapExactInParams, SwapExactOutParams};
use crate::domain::{Address, Amount, Selector};
use crate::error::{DexError, Result};
use crate::facets::facet_identity;
use crate::pools::{amounts_in, amounts_out};
use crate::traits::Facet;

facet_identity!(
    /// Exact-input and exact-output swaps along a token path.
    ///
    /// Amounts for every hop are quoted up front from current reserves;
    /// the first pool is then funded from the caller and each pool pays
    /// directly into the next.  A failing hop fails the whole call.
    SwapRouterFacet,
    "router-swap"
);

const SELECTORS: &[Selector] = &[
    Selector::SwapExactTokensForTokens,
    Selector::SwapTokensForExactTokens,
];

impl Facet<RouterLayout> for SwapRouterFacet {
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
            Call::SwapExactTokensForTokens(params) => {
                route::ensure_deadline(ctx, params.deadline)?;
                route::locked(ctx, |ctx| swap_exact_in(ctx, &params))
            }
            Call::SwapTokensForExactTokens(params) => {
                route::ensure_deadline(ctx, params.deadline)?;
                route::locked(ctx, |ctx| swap_exact_out(ctx, &params))
            }
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

fn swap_exact_in(ctx: Ctx<'_, '_>, params: &SwapExactInParams) -> Result<Return> {
    if params.to.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let legs = route::resolve(ctx, &params.path)?;
    let amounts = amounts_out(params.amount_in, &route::hops(&legs))?;
    let Some(&out) = amounts.last() else {
        return Err(DexError::InvalidPath);
    };
    if out < params.amount_out_min {
        return Err(DexError::InsufficientOutputAmount);
    }
    settle(ctx, &legs, &amounts, params.to)?;
    Ok(Return::Amounts(amounts))
}

fn swap_exact_out(ctx: Ctx<'_, '_>, params: &SwapExactOutParams) -> Result<Return> {
    if params.to.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let legs = route::resolve(ctx, &params.path)?;
    let amounts = amounts_in(params.amount_out, &route::hops(&legs))?;
    let Some(&input) = amounts.first() else {
        return Err(DexError::InvalidPath);
    };
    if input > params.amount_in_max {
        return Err(DexError::ExcessiveInputAmount);
    }
    settle(ctx, &legs, &amounts, params.to)?;
    Ok(Return::Amounts(amounts))
}

/// Funds the first pool and runs every hop.
fn settle(ctx: Ctx<'_, '_>, legs: &[Leg], amounts: &[Amount], to: Address) -> Result<()> {
    let (Some(first), Some(&input)) = (legs.first(), amounts.first()) else {
        return Err(DexError::InvalidPath);
    };
    route::pull(ctx, first.token_in, first.pair, input)?;
    route::execute(ctx, legs, amounts, to)?;
    debug!(
        router = %ctx.this(),
        hops = legs.len(),
        amount_in = input.get(),
        amount_out = amounts.last().map_or(0, Amount::get),
        %to,
        "route settled"
    );
    Ok(())
}

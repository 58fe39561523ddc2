//! Deposits and withdrawals through the router.

use tracing::debug;

use super::RouterLayout;
use super::route::{self, Ctx};
use crate::diamond::{AddLiquidityParams, Call, Context, RemoveLiquidityParams, Return};
use crate::domain::{Address, Amount, Selector, sort_tokens};
use crate::error::{DexError, Result};
use crate::facets::facet_identity;
use crate::pools::quote;
use crate::traits::Facet;

facet_identity!(
    /// `addLiquidity` and `removeLiquidity`.
    ///
    /// Both pull the caller's tokens (or shares) into the pool on the
    /// router's allowance before asking the factory to mint or burn, so
    /// callers approve the router, never the pool.
    LiquidityRouterFacet,
    "router-liquidity"
);

const SELECTORS: &[Selector] = &[Selector::AddLiquidity, Selector::RemoveLiquidity];

impl Facet<RouterLayout> for LiquidityRouterFacet {
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
            Call::AddLiquidity(params) => {
                route::ensure_deadline(ctx, params.deadline)?;
                route::locked(ctx, |ctx| add_liquidity(ctx, &params))
            }
            Call::RemoveLiquidity(params) => {
                route::ensure_deadline(ctx, params.deadline)?;
                route::locked(ctx, |ctx| remove_liquidity(ctx, &params))
            }
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

/// Deposit matching the pool's current ratio.
///
/// An empty pool takes the desired amounts verbatim.  Otherwise one side
/// is kept at its desired amount and the other is clamped to the ratio;
/// a clamped side below its minimum fails.
pub(crate) fn optimal_deposit(
    params: &AddLiquidityParams,
    reserve_a: Amount,
    reserve_b: Amount,
) -> Result<(Amount, Amount)> {
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Ok((params.amount_a_desired, params.amount_b_desired));
    }
    let amount_b_optimal = quote(params.amount_a_desired, reserve_a, reserve_b)?;
    if amount_b_optimal <= params.amount_b_desired {
        if amount_b_optimal < params.amount_b_min {
            return Err(DexError::InsufficientBAmount);
        }
        return Ok((params.amount_a_desired, amount_b_optimal));
    }
    let amount_a_optimal = quote(params.amount_b_desired, reserve_b, reserve_a)?;
    if amount_a_optimal > params.amount_a_desired {
        return Err(DexError::InvariantViolation("optimal A exceeds desired A"));
    }
    if amount_a_optimal < params.amount_a_min {
        return Err(DexError::InsufficientAAmount);
    }
    Ok((amount_a_optimal, params.amount_b_desired))
}

fn pair_for_deposit(ctx: Ctx<'_, '_>, token_a: Address, token_b: Address) -> Result<Address> {
    if let Some(pair) = route::find_pair(ctx, token_a, token_b)? {
        return Ok(pair);
    }
    let config = ctx.layout().config().clone();
    if !config.create_missing_pairs() {
        return Err(DexError::UnknownPool(Address::ZERO));
    }
    let factory = ctx.layout().factory();
    let params = config.default_pool_params();
    let pair = ctx
        .call(
            factory,
            Call::CreatePair {
                token_a,
                token_b,
                swap_fee: params.swap_fee(),
                protocol_fee: params.protocol_fee(),
                admin: config.default_pool_admin(),
            },
        )?
        .into_address()?;
    debug!(router = %ctx.this(), %pair, "created missing pair");
    Ok(pair)
}

fn add_liquidity(ctx: Ctx<'_, '_>, params: &AddLiquidityParams) -> Result<Return> {
    if params.to.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let pair = pair_for_deposit(ctx, params.token_a, params.token_b)?;
    let info = route::pair_info(ctx, pair)?;
    let (reserve_a, reserve_b) = route::oriented(&info, params.token_a);
    let (amount_a, amount_b) = optimal_deposit(params, reserve_a, reserve_b)?;

    route::pull(ctx, params.token_a, pair, amount_a)?;
    route::pull(ctx, params.token_b, pair, amount_b)?;
    let factory = ctx.layout().factory();
    let liquidity = ctx
        .call(factory, Call::Mint { pair, to: params.to })?
        .into_liquidity()?;
    debug!(
        router = %ctx.this(),
        %pair,
        amount_a = amount_a.get(),
        amount_b = amount_b.get(),
        liquidity = liquidity.get(),
        "liquidity added"
    );
    Ok(Return::Deposit {
        amount_a,
        amount_b,
        liquidity,
    })
}

fn remove_liquidity(ctx: Ctx<'_, '_>, params: &RemoveLiquidityParams) -> Result<Return> {
    if params.to.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let pair = route::require_pair(ctx, params.token_a, params.token_b)?;
    // Shares are a ledger token keyed by the pool identity.
    route::pull(ctx, pair, pair, params.liquidity.as_amount())?;
    let factory = ctx.layout().factory();
    let (amount0, amount1) = ctx
        .call(factory, Call::Burn { pair, to: params.to })?
        .into_token_amounts()?;
    let (token0, _) = sort_tokens(params.token_a, params.token_b);
    let (amount_a, amount_b) = if params.token_a == token0 {
        (amount0, amount1)
    } else {
        (amount1, amount0)
    };
    if amount_a < params.amount_a_min {
        return Err(DexError::InsufficientAAmount);
    }
    if amount_b < params.amount_b_min {
        return Err(DexError::InsufficientBAmount);
    }
    debug!(
        router = %ctx.this(),
        %pair,
        amount_a = amount_a.get(),
        amount_b = amount_b.get(),
        "liquidity removed"
    );
    Ok(Return::TokenAmounts(amount_a, amount_b))
}

//! Path resolution and hop execution shared by the router facets.
//!
//! Everything here reaches pools through nested calls into the factory
//! diamond, with the router as the caller.

use super::RouterLayout;
use crate::diamond::guard::with_lock;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Amount, sort_tokens};
use crate::error::{DexError, Result};
use crate::pools::{Hop, PairInfo};

pub(crate) type Ctx<'c, 'a> = &'c mut Context<'a, RouterLayout>;

/// One pool visited along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Leg {
    pub pair: Address,
    pub token_in: Address,
    pub token_out: Address,
    pub hop: Hop,
}

/// Fails once `deadline` has passed.
pub(crate) fn ensure_deadline(ctx: &Context<'_, RouterLayout>, deadline: u64) -> Result<()> {
    let now = ctx.now();
    if now > deadline {
        return Err(DexError::Expired { deadline, now });
    }
    Ok(())
}

/// Runs `body` holding the router's re-entrancy flag.
pub(crate) fn locked(
    ctx: Ctx<'_, '_>,
    body: impl FnOnce(Ctx<'_, '_>) -> Result<Return>,
) -> Result<Return> {
    with_lock(ctx, |ctx| Ok(ctx.layout_mut().lock_flag()), body)
}

/// Pool registered for two tokens, if any.
pub(crate) fn find_pair(
    ctx: Ctx<'_, '_>,
    token_a: Address,
    token_b: Address,
) -> Result<Option<Address>> {
    let factory = ctx.layout().factory();
    let pair = ctx
        .call(factory, Call::GetPair { token_a, token_b })?
        .into_address()?;
    Ok((!pair.is_zero()).then_some(pair))
}

/// Pool registered for two tokens.
///
/// The registry has no identity to report for a missing pair, so the
/// error carries the null address.
pub(crate) fn require_pair(
    ctx: Ctx<'_, '_>,
    token_a: Address,
    token_b: Address,
) -> Result<Address> {
    find_pair(ctx, token_a, token_b)?.ok_or(DexError::UnknownPool(Address::ZERO))
}

pub(crate) fn pair_info(ctx: Ctx<'_, '_>, pair: Address) -> Result<PairInfo> {
    let factory = ctx.layout().factory();
    let info = ctx.call(factory, Call::PairInfo { pair })?.into_pair_info()?;
    Ok(*info)
}

/// `(reserve_a, reserve_b)` of `info` oriented to `token_a`.
pub(crate) fn oriented(info: &PairInfo, token_a: Address) -> (Amount, Amount) {
    let reserves = info.reserves;
    if token_a == info.token0 {
        (reserves.reserve0, reserves.reserve1)
    } else {
        (reserves.reserve1, reserves.reserve0)
    }
}

/// Resolves every hop of `path`.
///
/// # Errors
///
/// - [`DexError::InvalidPath`] for fewer than two tokens.
/// - [`DexError::UnknownPool`] if a hop has no pool.
pub(crate) fn resolve(ctx: Ctx<'_, '_>, path: &[Address]) -> Result<Vec<Leg>> {
    if path.len() < 2 {
        return Err(DexError::InvalidPath);
    }
    let mut legs = Vec::with_capacity(path.len() - 1);
    for window in path.windows(2) {
        let &[token_in, token_out] = window else {
            return Err(DexError::InvalidPath);
        };
        let pair = require_pair(ctx, token_in, token_out)?;
        let info = pair_info(ctx, pair)?;
        let (reserve_in, reserve_out) = oriented(&info, token_in);
        legs.push(Leg {
            pair,
            token_in,
            token_out,
            hop: Hop {
                reserve_in,
                reserve_out,
                fee: info.params.swap_fee(),
            },
        });
    }
    Ok(legs)
}

pub(crate) fn hops(legs: &[Leg]) -> Vec<Hop> {
    legs.iter().map(|leg| leg.hop).collect()
}

/// Moves `amount` of `token` from the caller to `to` on the router's
/// allowance.
pub(crate) fn pull(ctx: Ctx<'_, '_>, token: Address, to: Address, amount: Amount) -> Result<()> {
    let (router, caller) = (ctx.this(), ctx.caller());
    ctx.ledger().transfer_from(token, router, caller, to, amount)
}

/// Swaps through `legs`, each pool paying straight into the next one.
///
/// The first pool must already hold `amounts[0]`; `amounts[i + 1]` is the
/// output of leg `i`.
pub(crate) fn execute(
    ctx: Ctx<'_, '_>,
    legs: &[Leg],
    amounts: &[Amount],
    to: Address,
) -> Result<()> {
    let factory = ctx.layout().factory();
    let mut next_pairs = legs.iter().skip(1).map(|leg| leg.pair);
    for (leg, &amount_out) in legs.iter().zip(amounts.iter().skip(1)) {
        let (token0, _) = sort_tokens(leg.token_in, leg.token_out);
        let (amount0_out, amount1_out) = if leg.token_in == token0 {
            (Amount::ZERO, amount_out)
        } else {
            (amount_out, Amount::ZERO)
        };
        let recipient = next_pairs.next().unwrap_or(to);
        ctx.call(
            factory,
            Call::Swap {
                pair: leg.pair,
                amount0_out,
                amount1_out,
                to: recipient,
            },
        )?
        .into_unit()?;
    }
    Ok(())
}

//! Low-level pool operations.
//!
//! Callers send tokens (or, for `burn`, liquidity shares) to the pool's
//! address first and then invoke the operation; the pool credits whatever
//! its ledger balances show above its cached reserves.  Each operation
//! holds the pool's re-entrancy flag for its whole duration.

use tracing::debug;

use super::FactoryLayout;
use super::layout::pool_lock;
use crate::diamond::guard::with_lock;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Amount, Event, Liquidity, Selector};
use crate::error::{DexError, Result};
use crate::facets::facet_identity;
use crate::traits::Facet;

facet_identity!(
    /// Reserves, liquidity and swaps of every registered pool.
    ///
    /// The mutating operations are pausable and open to any caller: a
    /// pool only ever pays out against value it has already received.
    PoolFacet,
    "pool"
);

const SELECTORS: &[Selector] = &[
    Selector::GetReserves,
    Selector::PairInfo,
    Selector::Mint,
    Selector::Burn,
    Selector::Swap,
    Selector::Skim,
    Selector::Sync,
];

type Ctx<'c, 'a> = &'c mut Context<'a, FactoryLayout>;

fn balances(ctx: Ctx<'_, '_>, pair: Address) -> Result<(Address, Address, Amount, Amount)> {
    let key = ctx.layout().require_pair(pair)?.key();
    let (token0, token1) = (key.token0(), key.token1());
    let ledger = ctx.ledger();
    Ok((
        token0,
        token1,
        ledger.balance_of(token0, pair),
        ledger.balance_of(token1, pair),
    ))
}

fn emit_sync(ctx: Ctx<'_, '_>, pair: Address) -> Result<()> {
    let reserves = ctx.layout().require_pair(pair)?.reserves();
    ctx.emit(Event::Sync {
        pair,
        reserve0: reserves.reserve0,
        reserve1: reserves.reserve1,
    });
    Ok(())
}

fn mint(ctx: Ctx<'_, '_>, pair: Address, to: Address) -> Result<Return> {
    if to.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let (_, _, balance0, balance1) = balances(ctx, pair)?;
    let now = ctx.now();
    let (fee_on, fee_to) = (ctx.layout().protocol_fee_on(), ctx.layout().fee_to());
    let outcome = ctx
        .layout_mut()
        .pair_mut(pair)?
        .mint(balance0, balance1, now, fee_on)?;

    let ledger = ctx.ledger();
    if !outcome.protocol_fee.is_zero() {
        ledger.mint(pair, fee_to, outcome.protocol_fee.as_amount())?;
    }
    if !outcome.locked.is_zero() {
        ledger.mint(pair, Address::ZERO, outcome.locked.as_amount())?;
    }
    ledger.mint(pair, to, outcome.liquidity.as_amount())?;

    debug!(
        %pair,
        %to,
        amount0 = %outcome.amount0,
        amount1 = %outcome.amount1,
        liquidity = %outcome.liquidity,
        protocol_fee = %outcome.protocol_fee,
        "liquidity minted"
    );
    let sender = ctx.caller();
    ctx.emit(Event::Mint {
        pair,
        sender,
        amount0: outcome.amount0,
        amount1: outcome.amount1,
    });
    emit_sync(ctx, pair)?;
    Ok(Return::Liquidity(outcome.liquidity))
}

fn burn(ctx: Ctx<'_, '_>, pair: Address, to: Address) -> Result<Return> {
    if to.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let (token0, token1, balance0, balance1) = balances(ctx, pair)?;
    let liquidity = Liquidity::from_amount(ctx.ledger().balance_of(pair, pair));
    let now = ctx.now();
    let (fee_on, fee_to) = (ctx.layout().protocol_fee_on(), ctx.layout().fee_to());
    let outcome = ctx
        .layout_mut()
        .pair_mut(pair)?
        .burn(liquidity, balance0, balance1, now, fee_on)?;

    let ledger = ctx.ledger();
    if !outcome.protocol_fee.is_zero() {
        ledger.mint(pair, fee_to, outcome.protocol_fee.as_amount())?;
    }
    ledger.burn(pair, pair, liquidity.as_amount())?;
    ledger.transfer(token0, pair, to, outcome.amount0)?;
    ledger.transfer(token1, pair, to, outcome.amount1)?;

    debug!(
        %pair,
        %to,
        %liquidity,
        amount0 = %outcome.amount0,
        amount1 = %outcome.amount1,
        "liquidity burned"
    );
    let sender = ctx.caller();
    ctx.emit(Event::Burn {
        pair,
        sender,
        amount0: outcome.amount0,
        amount1: outcome.amount1,
        to,
    });
    emit_sync(ctx, pair)?;
    Ok(Return::TokenAmounts(outcome.amount0, outcome.amount1))
}

fn swap(
    ctx: Ctx<'_, '_>,
    pair: Address,
    amount0_out: Amount,
    amount1_out: Amount,
    to: Address,
) -> Result<Return> {
    ctx.layout()
        .require_pair(pair)?
        .check_swap(amount0_out, amount1_out, to)?;
    let key = ctx.layout().require_pair(pair)?.key();

    let ledger = ctx.ledger();
    if !amount0_out.is_zero() {
        ledger.transfer(key.token0(), pair, to, amount0_out)?;
    }
    if !amount1_out.is_zero() {
        ledger.transfer(key.token1(), pair, to, amount1_out)?;
    }
    let (_, _, balance0, balance1) = balances(ctx, pair)?;
    let now = ctx.now();
    let outcome = ctx
        .layout_mut()
        .pair_mut(pair)?
        .settle_swap(amount0_out, amount1_out, balance0, balance1, now)?;

    debug!(
        %pair,
        %to,
        amount0_in = %outcome.amount0_in,
        amount1_in = %outcome.amount1_in,
        %amount0_out,
        %amount1_out,
        "swap settled"
    );
    let sender = ctx.caller();
    ctx.emit(Event::Swap {
        pair,
        sender,
        amount0_in: outcome.amount0_in,
        amount1_in: outcome.amount1_in,
        amount0_out,
        amount1_out,
        to,
    });
    emit_sync(ctx, pair)?;
    Ok(Return::Unit)
}

fn skim(ctx: Ctx<'_, '_>, pair: Address, to: Address) -> Result<Return> {
    let (token0, token1, balance0, balance1) = balances(ctx, pair)?;
    let (excess0, excess1) = ctx.layout().require_pair(pair)?.excess(balance0, balance1);
    let ledger = ctx.ledger();
    if !excess0.is_zero() {
        ledger.transfer(token0, pair, to, excess0)?;
    }
    if !excess1.is_zero() {
        ledger.transfer(token1, pair, to, excess1)?;
    }
    debug!(%pair, %to, %excess0, %excess1, "pool skimmed");
    Ok(Return::TokenAmounts(excess0, excess1))
}

fn sync(ctx: Ctx<'_, '_>, pair: Address) -> Result<Return> {
    let (_, _, balance0, balance1) = balances(ctx, pair)?;
    let now = ctx.now();
    ctx.layout_mut()
        .pair_mut(pair)?
        .sync(balance0, balance1, now)?;
    emit_sync(ctx, pair)?;
    Ok(Return::Unit)
}

fn locked(
    ctx: Ctx<'_, '_>,
    pair: Address,
    body: impl FnOnce(Ctx<'_, '_>) -> Result<Return>,
) -> Result<Return> {
    with_lock(ctx, |ctx| pool_lock(ctx, pair), body)
}

impl Facet<FactoryLayout> for PoolFacet {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn selectors(&self) -> &'static [Selector] {
        SELECTORS
    }

    fn execute(&self, ctx: &mut Context<'_, FactoryLayout>, call: Call) -> Result<Return> {
        match call {
            Call::GetReserves { pair } => {
                Ok(Return::Reserves(ctx.layout().require_pair(pair)?.reserves()))
            }
            Call::PairInfo { pair } => Ok(Return::PairInfo(Box::new(
                ctx.layout().require_pair(pair)?.info(),
            ))),
            Call::Mint { pair, to } => locked(ctx, pair, |ctx| mint(ctx, pair, to)),
            Call::Burn { pair, to } => locked(ctx, pair, |ctx| burn(ctx, pair, to)),
            Call::Swap {
                pair,
                amount0_out,
                amount1_out,
                to,
            } => locked(ctx, pair, |ctx| swap(ctx, pair, amount0_out, amount1_out, to)),
            Call::Skim { pair, to } => locked(ctx, pair, |ctx| skim(ctx, pair, to)),
            Call::Sync { pair } => locked(ctx, pair, |ctx| sync(ctx, pair)),
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::PoolParams;
    use crate::diamond::Storage;
    use crate::domain::PairKey;
    use crate::ledger::MemoryLedger;
    use crate::pools::Pair;
    use crate::traits::{Host, TokenLedger};

    struct Bare {
        ledger: MemoryLedger,
        now: u64,
    }

    impl Host for Bare {
        fn ledger(&mut self) -> &mut dyn TokenLedger {
            &mut self.ledger
        }

        fn now(&self) -> u64 {
            self.now
        }

        fn call(&mut self, _caller: Address, target: Address, _call: Call) -> Result<Return> {
            Err(DexError::UnknownTarget(target))
        }
    }

    const POOL: Address = Address::from_low_u64(500);
    const TOKEN0: Address = Address::from_low_u64(1);
    const TOKEN1: Address = Address::from_low_u64(2);
    const ALICE: Address = Address::from_low_u64(10);

    fn fixture() -> (Storage<FactoryLayout>, Bare) {
        let mut storage = Storage::<FactoryLayout>::new(Address::from_low_u64(99));
        let Ok(key) = PairKey::new(TOKEN0, TOKEN1) else {
            panic!("distinct tokens");
        };
        let Ok(_) = storage
            .layout_mut()
            .insert_pair(Pair::new(POOL, key, PoolParams::default(), ALICE, 0))
        else {
            panic!("insert");
        };
        (
            storage,
            Bare {
                ledger: MemoryLedger::new(),
                now: 1,
            },
        )
    }

    fn run(storage: &mut Storage<FactoryLayout>, host: &mut Bare, call: Call) -> Result<Return> {
        let mut ctx = Context::new(Address::from_low_u64(900), ALICE, storage, host);
        PoolFacet::new().execute(&mut ctx, call)
    }

    fn fund(host: &mut Bare, token: Address, to: Address, amount: u128) {
        let Ok(()) = host.ledger.mint(token, to, Amount::new(amount)) else {
            panic!("mint");
        };
    }

    #[test]
    fn mint_credits_shares_and_locks_minimum() {
        let (mut storage, mut host) = fixture();
        fund(&mut host, TOKEN0, POOL, 1_000_000);
        fund(&mut host, TOKEN1, POOL, 4_000_000);
        let Ok(Return::Liquidity(minted)) =
            run(&mut storage, &mut host, Call::Mint { pair: POOL, to: ALICE })
        else {
            panic!("expected minted shares");
        };
        assert_eq!(minted, Liquidity::new(2_000_000 - 1_000));
        assert_eq!(host.ledger.balance_of(POOL, ALICE), minted.as_amount());
        assert_eq!(host.ledger.balance_of(POOL, Address::ZERO), Amount::new(1_000));
        assert_eq!(host.ledger.total_supply(POOL), Amount::new(2_000_000));
        assert!(storage.core().events().iter().any(|e| e.name() == "Sync"));
    }

    #[test]
    fn lock_released_after_failure() {
        let (mut storage, mut host) = fixture();
        // nothing deposited
        assert_eq!(
            run(&mut storage, &mut host, Call::Mint { pair: POOL, to: ALICE }),
            Err(DexError::InsufficientLiquidityMinted)
        );
        let Some(pair) = storage.layout().pair(POOL) else {
            panic!("registered");
        };
        assert_eq!(pair.info().total_supply, Liquidity::ZERO);
        let Ok(_) = run(&mut storage, &mut host, Call::Sync { pair: POOL }) else {
            panic!("lock must be free again");
        };
    }

    #[test]
    fn reentry_into_held_pool_rejected() {
        let (mut storage, mut host) = fixture();
        let Ok(pair) = storage.layout_mut().pair_mut(POOL) else {
            panic!("registered");
        };
        *pair.lock_flag() = true;
        assert_eq!(
            run(&mut storage, &mut host, Call::Sync { pair: POOL }),
            Err(DexError::Reentrancy)
        );
    }

    #[test]
    fn unknown_pool() {
        let (mut storage, mut host) = fixture();
        let stranger = Address::from_low_u64(501);
        assert_eq!(
            run(&mut storage, &mut host, Call::GetReserves { pair: stranger }),
            Err(DexError::UnknownPool(stranger))
        );
        assert_eq!(
            run(&mut storage, &mut host, Call::Sync { pair: stranger }),
            Err(DexError::UnknownPool(stranger))
        );
    }

    #[test]
    fn skim_returns_excess() {
        let (mut storage, mut host) = fixture();
        fund(&mut host, TOKEN0, POOL, 10_000);
        fund(&mut host, TOKEN1, POOL, 10_000);
        let Ok(_) = run(&mut storage, &mut host, Call::Mint { pair: POOL, to: ALICE }) else {
            panic!("mint");
        };
        fund(&mut host, TOKEN0, POOL, 77);
        let Ok(ret) = run(&mut storage, &mut host, Call::Skim { pair: POOL, to: ALICE }) else {
            panic!("skim");
        };
        assert_eq!(ret, Return::TokenAmounts(Amount::new(77), Amount::ZERO));
        assert_eq!(host.ledger.balance_of(TOKEN0, ALICE), Amount::new(77));
    }
}

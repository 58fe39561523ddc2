//! Pool creation, lookup, enumeration and delisting.

use tracing::info;

use super::FactoryLayout;
use crate::config::PoolParams;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Amount, BasisPoints, Event, PairKey, Selector};
use crate::error::{DexError, Result, Role};
use crate::facets::facet_identity;
use crate::pools::Pair;
use crate::traits::Facet;

facet_identity!(
    /// The pool registry: one pool per unordered token pair.
    ///
    /// | Operation | Authority |
    /// |-----------|-----------|
    /// | `createPair` | owner, pair creators, or anyone when permissionless |
    /// | `getPair`, `allPairs`, `allPairsLength` | anyone |
    /// | `removePair` | owner or the pool's admin |
    /// | `migratePair` | owner |
    PairRegistryFacet,
    "pair-registry"
);

const SELECTORS: &[Selector] = &[
    Selector::CreatePair,
    Selector::GetPair,
    Selector::AllPairs,
    Selector::AllPairsLength,
    Selector::RemovePair,
    Selector::MigratePair,
];

/// Identity of the `nonce`-th pool created by `factory` for `key`.
///
/// Re-creating a removed pair gets a fresh nonce, hence a fresh identity.
#[must_use]
pub fn pair_address(factory: Address, key: PairKey, nonce: u64) -> Address {
    let factory = factory.as_bytes();
    let token0 = key.token0().as_bytes();
    let token1 = key.token1().as_bytes();
    let nonce = nonce.to_be_bytes();
    Address::derive(
        b"hydra-dex/pair",
        &[
            factory.as_slice(),
            token0.as_slice(),
            token1.as_slice(),
            nonce.as_slice(),
        ],
    )
}

fn create_pair(
    ctx: &mut Context<'_, FactoryLayout>,
    token_a: Address,
    token_b: Address,
    swap_fee: BasisPoints,
    protocol_fee: BasisPoints,
    admin: Address,
) -> Result<Return> {
    let caller = ctx.caller();
    let layout = ctx.layout();
    let authorised = caller == ctx.storage().core().owner()
        || layout.permissionless()
        || layout.is_pair_creator(caller);
    if !authorised {
        return Err(DexError::unauthorized(Role::PairCreator, caller));
    }

    let key = PairKey::new(token_a, token_b)?;
    if admin.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let params = PoolParams::new(swap_fee, protocol_fee)?;
    if layout.get_pair(key.token0(), key.token1()).is_some() {
        return Err(DexError::PairExists);
    }

    let (factory, now) = (ctx.this(), ctx.now());
    let nonce = ctx.layout_mut().next_nonce();
    let address = pair_address(factory, key, nonce);
    let count = ctx
        .layout_mut()
        .insert_pair(Pair::new(address, key, params, admin, now))?;
    info!(
        %factory,
        pair = %address,
        token0 = %key.token0(),
        token1 = %key.token1(),
        %swap_fee,
        %protocol_fee,
        count,
        "pair created"
    );
    ctx.emit(Event::PairCreated {
        token0: key.token0(),
        token1: key.token1(),
        pair: address,
        count,
    });
    Ok(Return::Address(address))
}

fn delist(ctx: &mut Context<'_, FactoryLayout>, pair: Address) -> Result<Pair> {
    let removed = ctx.layout_mut().remove_pair(pair)?;
    info!(
        factory = %ctx.this(),
        %pair,
        remaining = ctx.layout().all_pairs().len(),
        "pair removed"
    );
    ctx.emit(Event::PairRemoved {
        pair,
        token0: removed.token0(),
        token1: removed.token1(),
    });
    Ok(removed)
}

fn remove_pair(ctx: &mut Context<'_, FactoryLayout>, pair: Address) -> Result<Return> {
    let caller = ctx.caller();
    let admin = ctx.layout().require_pair(pair)?.admin();
    if caller != admin && caller != ctx.storage().core().owner() {
        return Err(DexError::unauthorized(Role::PoolAdmin, caller));
    }
    delist(ctx, pair)?;
    Ok(Return::Unit)
}

fn migrate_pair(
    ctx: &mut Context<'_, FactoryLayout>,
    pair: Address,
    recipient: Address,
) -> Result<Return> {
    ctx.require_owner()?;
    ctx.layout().require_pair(pair)?;
    if recipient.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let removed = delist(ctx, pair)?;

    let ledger = ctx.ledger();
    let mut swept = [Amount::ZERO; 2];
    for (token, amount) in [removed.token0(), removed.token1()].into_iter().zip(&mut swept) {
        *amount = ledger.balance_of(token, pair);
        if !amount.is_zero() {
            ledger.transfer(token, pair, recipient, *amount)?;
        }
    }
    let [amount0, amount1] = swept;
    info!(%pair, %recipient, %amount0, %amount1, "pair migrated");
    ctx.emit(Event::PairMigrated {
        pair,
        recipient,
        amount0,
        amount1,
    });
    Ok(Return::Unit)
}

impl Facet<FactoryLayout> for PairRegistryFacet {
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
            Call::CreatePair {
                token_a,
                token_b,
                swap_fee,
                protocol_fee,
                admin,
            } => create_pair(ctx, token_a, token_b, swap_fee, protocol_fee, admin),
            Call::GetPair { token_a, token_b } => Ok(Return::Address(
                ctx.layout()
                    .get_pair(token_a, token_b)
                    .unwrap_or(Address::ZERO),
            )),
            Call::AllPairs { index } => {
                let pairs = ctx.layout().all_pairs();
                pairs
                    .get(index)
                    .copied()
                    .map(Return::Address)
                    .ok_or(DexError::IndexOutOfBounds {
                        index,
                        len: pairs.len(),
                    })
            }
            Call::AllPairsLength => Ok(Return::Count(ctx.layout().all_pairs().len())),
            Call::RemovePair { pair } => remove_pair(ctx, pair),
            Call::MigratePair { pair, recipient } => migrate_pair(ctx, pair, recipient),
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn pair_address_depends_on_every_input() {
        let (a, b) = (Address::from_low_u64(1), Address::from_low_u64(2));
        let Ok(key) = PairKey::new(a, b) else {
            panic!("distinct tokens");
        };
        let factory = Address::from_low_u64(100);
        let base = pair_address(factory, key, 1);
        assert_ne!(base, pair_address(factory, key, 2));
        assert_ne!(base, pair_address(Address::from_low_u64(101), key, 1));
        let Ok(other) = PairKey::new(a, Address::from_low_u64(3)) else {
            panic!("distinct tokens");
        };
        assert_ne!(base, pair_address(factory, other, 1));
        assert_eq!(base, pair_address(factory, key, 1));
    }
}

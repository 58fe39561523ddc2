//! Per-pool administration.

use tracing::info;

use super::FactoryLayout;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, BasisPoints, Event, Selector};
use crate::error::{DexError, Result, Role};
use crate::facets::facet_identity;
use crate::traits::Facet;

facet_identity!(
    /// Transfers pool admin rights and adjusts pool fees.
    ///
    /// `setPoolAdmin` and `setSwapFee` belong to the pool's admin (or the
    /// owner); `setProtocolFee` belongs to the fee-setter.
    PoolAdminFacet,
    "pool-admin"
);

const SELECTORS: &[Selector] = &[
    Selector::SetPoolAdmin,
    Selector::SetSwapFee,
    Selector::SetProtocolFee,
];

fn require_pool_admin(ctx: &Context<'_, FactoryLayout>, pair: Address) -> Result<()> {
    let caller = ctx.caller();
    let admin = ctx.layout().require_pair(pair)?.admin();
    if caller == admin || caller == ctx.storage().core().owner() {
        Ok(())
    } else {
        Err(DexError::unauthorized(Role::PoolAdmin, caller))
    }
}

fn fees_changed(ctx: &mut Context<'_, FactoryLayout>, pair: Address) -> Result<Return> {
    let params = ctx.layout().require_pair(pair)?.params();
    info!(
        %pair,
        swap_fee = %params.swap_fee(),
        protocol_fee = %params.protocol_fee(),
        "pool fees changed"
    );
    ctx.emit(Event::PoolFeesChanged {
        pair,
        swap_fee: params.swap_fee(),
        protocol_fee: params.protocol_fee(),
    });
    Ok(Return::Unit)
}

fn set_swap_fee(
    ctx: &mut Context<'_, FactoryLayout>,
    pair: Address,
    fee: BasisPoints,
) -> Result<Return> {
    require_pool_admin(ctx, pair)?;
    ctx.layout_mut()
        .pair_mut(pair)?
        .params_mut()
        .set_swap_fee(fee)?;
    fees_changed(ctx, pair)
}

fn set_protocol_fee(
    ctx: &mut Context<'_, FactoryLayout>,
    pair: Address,
    fee: BasisPoints,
) -> Result<Return> {
    ctx.layout().require_pair(pair)?;
    ctx.layout().require_fee_setter(ctx.caller())?;
    ctx.layout_mut()
        .pair_mut(pair)?
        .params_mut()
        .set_protocol_fee(fee)?;
    fees_changed(ctx, pair)
}

impl Facet<FactoryLayout> for PoolAdminFacet {
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
            Call::SetPoolAdmin { pair, admin } => {
                require_pool_admin(ctx, pair)?;
                if admin.is_zero() {
                    return Err(DexError::ZeroAddress);
                }
                let pool = ctx.layout_mut().pair_mut(pair)?;
                let previous = pool.admin();
                pool.set_admin(admin);
                info!(%pair, %previous, new = %admin, "pool admin changed");
                ctx.emit(Event::PoolAdminChanged {
                    pair,
                    previous,
                    new: admin,
                });
                Ok(Return::Unit)
            }
            Call::SetSwapFee { pair, fee } => set_swap_fee(ctx, pair, fee),
            Call::SetProtocolFee { pair, fee } => set_protocol_fee(ctx, pair, fee),
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

//! Factory-wide fee governance and pair-creation rights.

use tracing::info;

use super::FactoryLayout;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Event, Selector};
use crate::error::{DexError, Result};
use crate::facets::facet_identity;
use crate::traits::Facet;

facet_identity!(
    /// Fee-setter, fee recipient, accrual policy and pair creators.
    ///
    /// The owner appoints the fee-setter and the pair creators; the
    /// fee-setter controls where protocol fees go and whether they
    /// accrue at all.  Setting the recipient to the null address turns
    /// protocol fees off.
    AccessControlFacet,
    "factory-access"
);

const SELECTORS: &[Selector] = &[
    Selector::FeeSetter,
    Selector::SetFeeSetter,
    Selector::FeeTo,
    Selector::SetFeeTo,
    Selector::SetPairCreator,
    Selector::IsPairCreator,
    Selector::ProtocolFeePolicy,
    Selector::SetProtocolFeePolicy,
];

impl Facet<FactoryLayout> for AccessControlFacet {
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
        let caller = ctx.caller();
        match call {
            Call::FeeSetter => Ok(Return::Address(ctx.layout().fee_setter())),
            Call::SetFeeSetter { account } => {
                ctx.require_owner()?;
                if account.is_zero() {
                    return Err(DexError::ZeroAddress);
                }
                let previous = ctx.layout_mut().set_fee_setter(account);
                info!(factory = %ctx.this(), %previous, new = %account, "fee-setter changed");
                ctx.emit(Event::FeeSetterChanged {
                    previous,
                    new: account,
                });
                Ok(Return::Unit)
            }
            Call::FeeTo => Ok(Return::Address(ctx.layout().fee_to())),
            Call::SetFeeTo { account } => {
                ctx.layout().require_fee_setter(caller)?;
                let previous = ctx.layout_mut().set_fee_to(account);
                info!(
                    factory = %ctx.this(),
                    %previous,
                    new = %account,
                    "protocol fee recipient changed"
                );
                ctx.emit(Event::FeeToChanged {
                    previous,
                    new: account,
                });
                Ok(Return::Unit)
            }
            Call::SetPairCreator { account, enabled } => {
                ctx.require_owner()?;
                if account.is_zero() {
                    return Err(DexError::ZeroAddress);
                }
                ctx.layout_mut().set_pair_creator(account, enabled);
                ctx.emit(Event::PairCreatorSet { account, enabled });
                Ok(Return::Unit)
            }
            Call::IsPairCreator { account } => {
                Ok(Return::Bool(ctx.layout().is_pair_creator(account)))
            }
            Call::ProtocolFeePolicy => Ok(Return::Policy(ctx.layout().protocol_fee_policy())),
            Call::SetProtocolFeePolicy { policy } => {
                ctx.layout().require_fee_setter(caller)?;
                ctx.layout_mut().set_policy(policy);
                info!(factory = %ctx.this(), %policy, "protocol fee policy changed");
                ctx.emit(Event::ProtocolFeePolicyChanged { policy });
                Ok(Return::Unit)
            }
            other => Err(DexError::UnknownOperation(other.selector())),
        }
    }
}

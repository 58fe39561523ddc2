//! Operation payloads and results routed through a diamond.
//!
//! A [`Call`] is one externally invocable operation together with its
//! arguments; [`Call::selector`] names the dispatch-table entry it is
//! routed by.  Facets answer with a [`Return`], which callers unpack with
//! the `into_*` accessors.

use super::FacetInfo;
use crate::config::{FactoryConfig, ProtocolFeePolicy, RouterConfig};
use crate::domain::{Address, Amount, BasisPoints, Liquidity, Selector};
use crate::error::{DexError, Result};
use crate::pools::{PairInfo, Reserves};

/// Arguments of `addLiquidity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityParams {
    /// First token.
    pub token_a: Address,
    /// Second token.
    pub token_b: Address,
    /// Most of `token_a` to deposit.
    pub amount_a_desired: Amount,
    /// Most of `token_b` to deposit.
    pub amount_b_desired: Amount,
    /// Least of `token_a` to deposit.
    pub amount_a_min: Amount,
    /// Least of `token_b` to deposit.
    pub amount_b_min: Amount,
    /// Recipient of the minted shares.
    pub to: Address,
    /// Latest acceptable timestamp.
    pub deadline: u64,
}

/// Arguments of `removeLiquidity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLiquidityParams {
    /// First token.
    pub token_a: Address,
    /// Second token.
    pub token_b: Address,
    /// Shares to burn.
    pub liquidity: Liquidity,
    /// Least of `token_a` to receive.
    pub amount_a_min: Amount,
    /// Least of `token_b` to receive.
    pub amount_b_min: Amount,
    /// Recipient of both tokens.
    pub to: Address,
    /// Latest acceptable timestamp.
    pub deadline: u64,
}

/// Arguments of `swapExactTokensForTokens`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactInParams {
    /// Exact amount of `path[0]` to sell.
    pub amount_in: Amount,
    /// Least of the last token to receive.
    pub amount_out_min: Amount,
    /// Token route, at least two entries.
    pub path: Vec<Address>,
    /// Recipient of the output.
    pub to: Address,
    /// Latest acceptable timestamp.
    pub deadline: u64,
}

/// Arguments of `swapTokensForExactTokens`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactOutParams {
    /// Exact amount of the last token to receive.
    pub amount_out: Amount,
    /// Most of `path[0]` to sell.
    pub amount_in_max: Amount,
    /// Token route, at least two entries.
    pub path: Vec<Address>,
    /// Recipient of the output.
    pub to: Address,
    /// Latest acceptable timestamp.
    pub deadline: u64,
}

/// One operation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Every facet with its selectors.
    Facets,
    /// Selectors of one facet.
    FacetSelectors {
        /// Facet address.
        facet: Address,
    },
    /// Every facet address.
    FacetAddresses,
    /// Facet owning `selector`, or the null address.
    FacetAddress {
        /// Operation looked up.
        selector: Selector,
    },

    /// Current owner.
    Owner,
    /// Hands ownership over.
    TransferOwnership {
        /// New owner.
        new_owner: Address,
    },
    /// Pause flag.
    Paused,
    /// Sets the pause flag.
    Pause,
    /// Clears the pause flag.
    Unpause,
    /// Grants or revokes pause rights.
    SetGuardian {
        /// Affected account.
        account: Address,
        /// Grant or revoke.
        enabled: bool,
    },
    /// Whether `account` holds pause rights.
    IsGuardian {
        /// Account checked.
        account: Address,
    },

    /// One-time factory initialisation.
    InitFactory(FactoryConfig),
    /// Registers a pool for two tokens.
    CreatePair {
        /// First token.
        token_a: Address,
        /// Second token.
        token_b: Address,
        /// Swap fee.
        swap_fee: BasisPoints,
        /// Protocol share of the swap fee.
        protocol_fee: BasisPoints,
        /// Pool admin.
        admin: Address,
    },
    /// Pool for two tokens, or the null address.
    GetPair {
        /// First token.
        token_a: Address,
        /// Second token.
        token_b: Address,
    },
    /// Pool at a registry index.
    AllPairs {
        /// Registry index.
        index: usize,
    },
    /// Number of registered pools.
    AllPairsLength,
    /// Delists a pool.
    RemovePair {
        /// Pool identity.
        pair: Address,
    },
    /// Delists a pool and sweeps its token balances.
    MigratePair {
        /// Pool identity.
        pair: Address,
        /// Recipient of the swept balances.
        recipient: Address,
    },
    /// Current fee-setter.
    FeeSetter,
    /// Appoints the fee-setter.
    SetFeeSetter {
        /// New fee-setter.
        account: Address,
    },
    /// Protocol fee recipient.
    FeeTo,
    /// Sets the protocol fee recipient.
    SetFeeTo {
        /// New recipient; zero disables protocol fees.
        account: Address,
    },
    /// Grants or revokes pair-creation rights.
    SetPairCreator {
        /// Affected account.
        account: Address,
        /// Grant or revoke.
        enabled: bool,
    },
    /// Whether `account` may create pairs.
    IsPairCreator {
        /// Account checked.
        account: Address,
    },
    /// Protocol-fee accrual policy.
    ProtocolFeePolicy,
    /// Switches the protocol-fee accrual policy.
    SetProtocolFeePolicy {
        /// New policy.
        policy: ProtocolFeePolicy,
    },
    /// Transfers a pool's admin role.
    SetPoolAdmin {
        /// Pool identity.
        pair: Address,
        /// New admin.
        admin: Address,
    },
    /// Changes a pool's swap fee.
    SetSwapFee {
        /// Pool identity.
        pair: Address,
        /// New swap fee.
        fee: BasisPoints,
    },
    /// Changes a pool's protocol share.
    SetProtocolFee {
        /// Pool identity.
        pair: Address,
        /// New protocol share of the swap fee.
        fee: BasisPoints,
    },
    /// Reserves and last update time of a pool.
    GetReserves {
        /// Pool identity.
        pair: Address,
    },
    /// Full snapshot of a pool.
    PairInfo {
        /// Pool identity.
        pair: Address,
    },
    /// Mints shares for tokens already sent to the pool.
    Mint {
        /// Pool identity.
        pair: Address,
        /// Share recipient.
        to: Address,
    },
    /// Burns the shares already sent to the pool.
    Burn {
        /// Pool identity.
        pair: Address,
        /// Token recipient.
        to: Address,
    },
    /// Sends outputs and settles against tokens already sent to the pool.
    Swap {
        /// Pool identity.
        pair: Address,
        /// Token0 to send out.
        amount0_out: Amount,
        /// Token1 to send out.
        amount1_out: Amount,
        /// Output recipient.
        to: Address,
    },
    /// Sends balances above reserves to `to`.
    Skim {
        /// Pool identity.
        pair: Address,
        /// Recipient of the excess.
        to: Address,
    },
    /// Forces reserves to balances.
    Sync {
        /// Pool identity.
        pair: Address,
    },

    /// One-time router initialisation.
    InitRouter {
        /// Factory diamond the router trades through.
        factory: Address,
        /// Router parameters.
        config: RouterConfig,
    },
    /// Linked factory.
    Factory,
    /// Deposits both tokens of a pair.
    AddLiquidity(AddLiquidityParams),
    /// Withdraws both tokens of a pair.
    RemoveLiquidity(RemoveLiquidityParams),
    /// Sells an exact input along a path.
    SwapExactTokensForTokens(SwapExactInParams),
    /// Buys an exact output along a path.
    SwapTokensForExactTokens(SwapExactOutParams),
    /// Chained output quotes.
    GetAmountsOut {
        /// Input of the first hop.
        amount_in: Amount,
        /// Token route.
        path: Vec<Address>,
    },
    /// Chained input quotes.
    GetAmountsIn {
        /// Output of the last hop.
        amount_out: Amount,
        /// Token route.
        path: Vec<Address>,
    },
    /// Proportional quote.
    Quote {
        /// Amount of token A.
        amount_a: Amount,
        /// Reserve of token A.
        reserve_a: Amount,
        /// Reserve of token B.
        reserve_b: Amount,
    },
}

impl Call {
    /// Dispatch-table key of this call.
    #[must_use]
    pub const fn selector(&self) -> Selector {
        match self {
            Self::Facets => Selector::Facets,
            Self::FacetSelectors { .. } => Selector::FacetSelectors,
            Self::FacetAddresses => Selector::FacetAddresses,
            Self::FacetAddress { .. } => Selector::FacetAddress,
            Self::Owner => Selector::Owner,
            Self::TransferOwnership { .. } => Selector::TransferOwnership,
            Self::Paused => Selector::Paused,
            Self::Pause => Selector::Pause,
            Self::Unpause => Selector::Unpause,
            Self::SetGuardian { .. } => Selector::SetGuardian,
            Self::IsGuardian { .. } => Selector::IsGuardian,
            Self::InitFactory(_) => Selector::InitFactory,
            Self::CreatePair { .. } => Selector::CreatePair,
            Self::GetPair { .. } => Selector::GetPair,
            Self::AllPairs { .. } => Selector::AllPairs,
            Self::AllPairsLength => Selector::AllPairsLength,
            Self::RemovePair { .. } => Selector::RemovePair,
            Self::MigratePair { .. } => Selector::MigratePair,
            Self::FeeSetter => Selector::FeeSetter,
            Self::SetFeeSetter { .. } => Selector::SetFeeSetter,
            Self::FeeTo => Selector::FeeTo,
            Self::SetFeeTo { .. } => Selector::SetFeeTo,
            Self::SetPairCreator { .. } => Selector::SetPairCreator,
            Self::IsPairCreator { .. } => Selector::IsPairCreator,
            Self::ProtocolFeePolicy => Selector::ProtocolFeePolicy,
            Self::SetProtocolFeePolicy { .. } => Selector::SetProtocolFeePolicy,
            Self::SetPoolAdmin { .. } => Selector::SetPoolAdmin,
            Self::SetSwapFee { .. } => Selector::SetSwapFee,
            Self::SetProtocolFee { .. } => Selector::SetProtocolFee,
            Self::GetReserves { .. } => Selector::GetReserves,
            Self::PairInfo { .. } => Selector::PairInfo,
            Self::Mint { .. } => Selector::Mint,
            Self::Burn { .. } => Selector::Burn,
            Self::Swap { .. } => Selector::Swap,
            Self::Skim { .. } => Selector::Skim,
            Self::Sync { .. } => Selector::Sync,
            Self::InitRouter { .. } => Selector::InitRouter,
            Self::Factory => Selector::Factory,
            Self::AddLiquidity(_) => Selector::AddLiquidity,
            Self::RemoveLiquidity(_) => Selector::RemoveLiquidity,
            Self::SwapExactTokensForTokens(_) => Selector::SwapExactTokensForTokens,
            Self::SwapTokensForExactTokens(_) => Selector::SwapTokensForExactTokens,
            Self::GetAmountsOut { .. } => Selector::GetAmountsOut,
            Self::GetAmountsIn { .. } => Selector::GetAmountsIn,
            Self::Quote { .. } => Selector::Quote,
        }
    }
}

/// Result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Return {
    /// Nothing.
    Unit,
    /// A flag.
    Bool(bool),
    /// An account, token, pool or facet.
    Address(Address),
    /// A count.
    Count(usize),
    /// A single amount.
    Amount(Amount),
    /// Per-hop amounts along a path.
    Amounts(Vec<Amount>),
    /// Amounts of a token pair, in the order the caller named the tokens.
    TokenAmounts(Amount, Amount),
    /// Shares.
    Liquidity(Liquidity),
    /// Outcome of `addLiquidity`.
    Deposit {
        /// Token A deposited.
        amount_a: Amount,
        /// Token B deposited.
        amount_b: Amount,
        /// Shares minted.
        liquidity: Liquidity,
    },
    /// Pool reserves.
    Reserves(Reserves),
    /// Pool snapshot.
    PairInfo(Box<PairInfo>),
    /// Protocol-fee policy.
    Policy(ProtocolFeePolicy),
    /// Loupe listing.
    Facets(Vec<FacetInfo>),
    /// Address listing.
    Addresses(Vec<Address>),
    /// Selector listing.
    Selectors(Vec<Selector>),
}

macro_rules! unpack {
    ($(#[$doc:meta] $name:ident => $variant:ident($ty:ty), $what:literal;)*) => {
        $(
            #[$doc]
            ///
            /// # Errors
            ///
            /// [`DexError::UnexpectedReturn`] for any other variant.
            pub fn $name(self) -> Result<$ty> {
                match self {
                    Self::$variant(v) => Ok(v),
                    _ => Err(DexError::UnexpectedReturn($what)),
                }
            }
        )*
    };
}

impl Return {
    unpack! {
        /// Unpacks [`Return::Bool`].
        into_bool => Bool(bool), "bool";
        /// Unpacks [`Return::Address`].
        into_address => Address(Address), "address";
        /// Unpacks [`Return::Count`].
        into_count => Count(usize), "count";
        /// Unpacks [`Return::Amount`].
        into_amount => Amount(Amount), "amount";
        /// Unpacks [`Return::Amounts`].
        into_amounts => Amounts(Vec<Amount>), "amounts";
        /// Unpacks [`Return::Liquidity`].
        into_liquidity => Liquidity(Liquidity), "liquidity";
        /// Unpacks [`Return::Reserves`].
        into_reserves => Reserves(Reserves), "reserves";
        /// Unpacks [`Return::PairInfo`].
        into_pair_info => PairInfo(Box<PairInfo>), "pair info";
        /// Unpacks [`Return::Policy`].
        into_policy => Policy(ProtocolFeePolicy), "protocol fee policy";
        /// Unpacks [`Return::Facets`].
        into_facets => Facets(Vec<FacetInfo>), "facets";
        /// Unpacks [`Return::Addresses`].
        into_addresses => Addresses(Vec<Address>), "addresses";
        /// Unpacks [`Return::Selectors`].
        into_selectors => Selectors(Vec<Selector>), "selectors";
    }

    /// Unpacks [`Return::Unit`].
    ///
    /// # Errors
    ///
    /// [`DexError::UnexpectedReturn`] for any other variant.
    pub fn into_unit(self) -> Result<()> {
        match self {
            Self::Unit => Ok(()),
            _ => Err(DexError::UnexpectedReturn("unit")),
        }
    }

    /// Unpacks [`Return::TokenAmounts`].
    ///
    /// # Errors
    ///
    /// [`DexError::UnexpectedReturn`] for any other variant.
    pub fn into_token_amounts(self) -> Result<(Amount, Amount)> {
        match self {
            Self::TokenAmounts(a, b) => Ok((a, b)),
            _ => Err(DexError::UnexpectedReturn("token amounts")),
        }
    }

    /// Unpacks [`Return::Deposit`] as `(amount_a, amount_b, liquidity)`.
    ///
    /// # Errors
    ///
    /// [`DexError::UnexpectedReturn`] for any other variant.
    pub fn into_deposit(self) -> Result<(Amount, Amount, Liquidity)> {
        match self {
            Self::Deposit {
                amount_a,
                amount_b,
                liquidity,
            } => Ok((amount_a, amount_b, liquidity)),
            _ => Err(DexError::UnexpectedReturn("deposit")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn selector_matches_variant() {
        let call = Call::GetPair {
            token_a: Address::from_low_u64(1),
            token_b: Address::from_low_u64(2),
        };
        assert_eq!(call.selector(), Selector::GetPair);
        assert_eq!(
            Call::InitFactory(FactoryConfig::new(Address::from_low_u64(1))).selector(),
            Selector::InitFactory
        );
    }

    #[test]
    fn unpack_matching_variant() {
        let Ok(a) = Return::Address(Address::from_low_u64(5)).into_address() else {
            panic!("expected address");
        };
        assert_eq!(a, Address::from_low_u64(5));
        assert_eq!(Return::Unit.into_unit(), Ok(()));
    }

    #[test]
    fn unpack_wrong_variant() {
        assert_eq!(
            Return::Unit.into_address(),
            Err(DexError::UnexpectedReturn("address"))
        );
        assert_eq!(
            Return::Count(1).into_deposit(),
            Err(DexError::UnexpectedReturn("deposit"))
        );
    }
}

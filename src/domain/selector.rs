//! Operation identifiers routed by a diamond's dispatch table.

use core::fmt;

/// Stable identifier of one externally invocable operation.
///
/// Each selector is owned by at most one facet of a diamond at a time.
/// The [`Display`](fmt::Display) form is the operation's camel-case name,
/// which is also what appears in logs and errors.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Selector;
///
/// assert_eq!(Selector::SwapExactTokensForTokens.to_string(), "swapExactTokensForTokens");
/// assert!(Selector::CreatePair.is_pausable());
/// assert!(!Selector::GetPair.is_pausable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Selector {
    // -- loupe --------------------------------------------------------------
    /// List every facet with its selectors.
    Facets,
    /// Selectors owned by one facet.
    FacetSelectors,
    /// Addresses of every facet.
    FacetAddresses,
    /// Facet owning one selector.
    FacetAddress,

    // -- ownership / pause --------------------------------------------------
    /// Current owner.
    Owner,
    /// Hand ownership to a new account.
    TransferOwnership,
    /// Whether the diamond is paused.
    Paused,
    /// Halt mutating operations.
    Pause,
    /// Resume mutating operations.
    Unpause,
    /// Grant or revoke pause rights.
    SetGuardian,
    /// Whether an account holds pause rights.
    IsGuardian,

    // -- factory ------------------------------------------------------------
    /// Factory storage initialisation.
    InitFactory,
    /// Register a new pool.
    CreatePair,
    /// Look up the pool for two tokens.
    GetPair,
    /// Pool at a registry index.
    AllPairs,
    /// Number of registered pools.
    AllPairsLength,
    /// Delist a pool.
    RemovePair,
    /// Delist a pool and sweep its token balances.
    MigratePair,
    /// Current fee-setter.
    FeeSetter,
    /// Appoint the fee-setter.
    SetFeeSetter,
    /// Current protocol fee recipient.
    FeeTo,
    /// Set the protocol fee recipient.
    SetFeeTo,
    /// Grant or revoke pair-creation rights.
    SetPairCreator,
    /// Whether an account may create pairs.
    IsPairCreator,
    /// Current protocol-fee accrual policy.
    ProtocolFeePolicy,
    /// Switch the protocol-fee accrual policy.
    SetProtocolFeePolicy,
    /// Transfer a pool's admin role.
    SetPoolAdmin,
    /// Change a pool's swap fee.
    SetSwapFee,
    /// Change a pool's protocol fee share.
    SetProtocolFee,
    /// Pool reserves and last update time.
    GetReserves,
    /// Full snapshot of one pool.
    PairInfo,
    /// Mint shares against tokens sent to a pool.
    Mint,
    /// Burn shares sent to a pool.
    Burn,
    /// Low-level swap against tokens sent to a pool.
    Swap,
    /// Send a pool's excess balances away.
    Skim,
    /// Force a pool's reserves to its balances.
    Sync,

    // -- router -------------------------------------------------------------
    /// Router storage initialisation.
    InitRouter,
    /// Factory linked to the router.
    Factory,
    /// Deposit both tokens into a pool.
    AddLiquidity,
    /// Withdraw both tokens from a pool.
    RemoveLiquidity,
    /// Swap an exact input along a path.
    SwapExactTokensForTokens,
    /// Swap for an exact output along a path.
    SwapTokensForExactTokens,
    /// Chain output quotes along a path.
    GetAmountsOut,
    /// Chain input quotes backwards along a path.
    GetAmountsIn,
    /// Proportional quote against reserves.
    Quote,
}

impl Selector {
    /// Camel-case operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Facets => "facets",
            Self::FacetSelectors => "facetFunctionSelectors",
            Self::FacetAddresses => "facetAddresses",
            Self::FacetAddress => "facetAddress",
            Self::Owner => "owner",
            Self::TransferOwnership => "transferOwnership",
            Self::Paused => "paused",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::SetGuardian => "setGuardian",
            Self::IsGuardian => "isGuardian",
            Self::InitFactory => "initFactory",
            Self::CreatePair => "createPair",
            Self::GetPair => "getPair",
            Self::AllPairs => "allPairs",
            Self::AllPairsLength => "allPairsLength",
            Self::RemovePair => "removePair",
            Self::MigratePair => "migratePair",
            Self::FeeSetter => "feeSetter",
            Self::SetFeeSetter => "setFeeSetter",
            Self::FeeTo => "feeTo",
            Self::SetFeeTo => "setFeeTo",
            Self::SetPairCreator => "setPairCreator",
            Self::IsPairCreator => "isPairCreator",
            Self::ProtocolFeePolicy => "protocolFeePolicy",
            Self::SetProtocolFeePolicy => "setProtocolFeePolicy",
            Self::SetPoolAdmin => "setPoolAdmin",
            Self::SetSwapFee => "setSwapFee",
            Self::SetProtocolFee => "setProtocolFee",
            Self::GetReserves => "getReserves",
            Self::PairInfo => "pairInfo",
            Self::Mint => "mint",
            Self::Burn => "burn",
            Self::Swap => "swap",
            Self::Skim => "skim",
            Self::Sync => "sync",
            Self::InitRouter => "initRouter",
            Self::Factory => "factory",
            Self::AddLiquidity => "addLiquidity",
            Self::RemoveLiquidity => "removeLiquidity",
            Self::SwapExactTokensForTokens => "swapExactTokensForTokens",
            Self::SwapTokensForExactTokens => "swapTokensForExactTokens",
            Self::GetAmountsOut => "getAmountsOut",
            Self::GetAmountsIn => "getAmountsIn",
            Self::Quote => "quote",
        }
    }

    /// Whether the pause switch blocks this operation.
    ///
    /// Covers pair creation and every operation that moves pool reserves.
    /// Lookups, quotes, governance and the pause toggles stay callable.
    #[must_use]
    pub const fn is_pausable(&self) -> bool {
        matches!(
            self,
            Self::CreatePair
                | Self::Mint
                | Self::Burn
                | Self::Swap
                | Self::Skim
                | Self::Sync
                | Self::AddLiquidity
                | Self::RemoveLiquidity
                | Self::SwapExactTokensForTokens
                | Self::SwapTokensForExactTokens
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

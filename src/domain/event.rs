//! Domain events recorded in a diamond's journal.

use super::{Address, Amount, BasisPoints, Selector};
use crate::config::ProtocolFeePolicy;

/// Something observable that a committed operation did.
///
/// Events are appended to the journal inside the emitting diamond's
/// storage, so an operation that fails leaves no events behind.  Hosts
/// drain the journal with
/// [`Runtime::take_events`](crate::runtime::Runtime::take_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An upgrade batch was applied.
    DiamondCut {
        /// Selectors newly assigned.
        added: Vec<Selector>,
        /// Selectors moved to another facet.
        replaced: Vec<Selector>,
        /// Selectors dropped from the table.
        removed: Vec<Selector>,
        /// Facet that ran the init call, if any.
        init: Option<Address>,
    },
    /// A layout ran its one-time initialisation.
    Initialized {
        /// Layout name.
        layout: &'static str,
        /// Layout version.
        version: u16,
    },
    /// Ownership moved.
    OwnershipTransferred {
        /// Previous owner.
        previous: Address,
        /// New owner.
        new: Address,
    },
    /// The diamond was paused.
    Paused {
        /// Account that paused.
        account: Address,
    },
    /// The diamond was unpaused.
    Unpaused {
        /// Account that unpaused.
        account: Address,
    },
    /// Pause rights were granted or revoked.
    GuardianSet {
        /// Affected account.
        account: Address,
        /// Whether the account may now pause.
        enabled: bool,
    },
    /// A pool was registered.
    PairCreated {
        /// Lower token.
        token0: Address,
        /// Higher token.
        token1: Address,
        /// New pool identity.
        pair: Address,
        /// Registry length after insertion.
        count: usize,
    },
    /// A pool was delisted.
    PairRemoved {
        /// Removed pool.
        pair: Address,
        /// Lower token.
        token0: Address,
        /// Higher token.
        token1: Address,
    },
    /// A delisted pool's balances were swept.
    PairMigrated {
        /// Migrated pool.
        pair: Address,
        /// Recipient of the sweep.
        recipient: Address,
        /// Token0 swept.
        amount0: Amount,
        /// Token1 swept.
        amount1: Amount,
    },
    /// Shares were minted against a deposit.
    Mint {
        /// Pool.
        pair: Address,
        /// Caller of the mint.
        sender: Address,
        /// Token0 deposited.
        amount0: Amount,
        /// Token1 deposited.
        amount1: Amount,
    },
    /// Shares were burned for a withdrawal.
    Burn {
        /// Pool.
        pair: Address,
        /// Caller of the burn.
        sender: Address,
        /// Token0 withdrawn.
        amount0: Amount,
        /// Token1 withdrawn.
        amount1: Amount,
        /// Recipient of the withdrawal.
        to: Address,
    },
    /// A swap settled against a pool.
    Swap {
        /// Pool.
        pair: Address,
        /// Caller of the swap.
        sender: Address,
        /// Token0 received by the pool.
        amount0_in: Amount,
        /// Token1 received by the pool.
        amount1_in: Amount,
        /// Token0 sent out.
        amount0_out: Amount,
        /// Token1 sent out.
        amount1_out: Amount,
        /// Recipient of the output.
        to: Address,
    },
    /// A pool's reserves were updated.
    Sync {
        /// Pool.
        pair: Address,
        /// New reserve of token0.
        reserve0: Amount,
        /// New reserve of token1.
        reserve1: Amount,
    },
    /// The fee-setter changed.
    FeeSetterChanged {
        /// Previous fee-setter.
        previous: Address,
        /// New fee-setter.
        new: Address,
    },
    /// The protocol fee recipient changed.
    FeeToChanged {
        /// Previous recipient.
        previous: Address,
        /// New recipient (zero disables protocol fees).
        new: Address,
    },
    /// Pair-creation rights were granted or revoked.
    PairCreatorSet {
        /// Affected account.
        account: Address,
        /// Whether the account may now create pairs.
        enabled: bool,
    },
    /// The protocol-fee accrual policy changed.
    ProtocolFeePolicyChanged {
        /// New policy.
        policy: ProtocolFeePolicy,
    },
    /// A pool's admin changed.
    PoolAdminChanged {
        /// Pool.
        pair: Address,
        /// Previous admin.
        previous: Address,
        /// New admin.
        new: Address,
    },
    /// A pool's fee parameters changed.
    PoolFeesChanged {
        /// Pool.
        pair: Address,
        /// Swap fee now in force.
        swap_fee: BasisPoints,
        /// Protocol share of the swap fee now in force.
        protocol_fee: BasisPoints,
    },
}

impl Event {
    /// Short event name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DiamondCut { .. } => "DiamondCut",
            Self::Initialized { .. } => "Initialized",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::Paused { .. } => "Paused",
            Self::Unpaused { .. } => "Unpaused",
            Self::GuardianSet { .. } => "GuardianSet",
            Self::PairCreated { .. } => "PairCreated",
            Self::PairRemoved { .. } => "PairRemoved",
            Self::PairMigrated { .. } => "PairMigrated",
            Self::Mint { .. } => "Mint",
            Self::Burn { .. } => "Burn",
            Self::Swap { .. } => "Swap",
            Self::Sync { .. } => "Sync",
            Self::FeeSetterChanged { .. } => "FeeSetterChanged",
            Self::FeeToChanged { .. } => "FeeToChanged",
            Self::PairCreatorSet { .. } => "PairCreatorSet",
            Self::ProtocolFeePolicyChanged { .. } => "ProtocolFeePolicyChanged",
            Self::PoolAdminChanged { .. } => "PoolAdminChanged",
            Self::PoolFeesChanged { .. } => "PoolFeesChanged",
        }
    }
}

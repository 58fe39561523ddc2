//! Unified error types for the Hydra DEX library.
//!
//! All fallible operations across the crate return [`DexError`] as their
//! error type.  Every variant belongs to exactly one [`ErrorKind`], so
//! hosts can react to a whole class of failures (for example, retrying
//! after an [`ErrorKind::Availability`] error) without matching on
//! individual variants.
//!
//! Any error raised at any nesting depth aborts the whole top-level
//! operation: the runtime discards every write attempted by it.

use core::fmt;

use crate::domain::{Address, Selector};

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, DexError>;

/// Broad failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed arguments: identical tokens, null addresses, bad paths,
    /// stale deadlines, out-of-range fees.
    Validation,
    /// The request conflicts with current state (dispatch table or registry).
    StateConflict,
    /// The pool economics reject the request (slippage, empty reserves).
    Economic,
    /// The caller lacks the role required by the operation.
    Authority,
    /// The system is paused.
    Availability,
    /// A nested call re-entered a pool or the router.
    Reentrancy,
    /// Arithmetic fault or broken internal invariant; indicates a bug.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::StateConflict => "state-conflict",
            Self::Economic => "economic",
            Self::Authority => "authority",
            Self::Availability => "availability",
            Self::Reentrancy => "reentrancy",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Authority roles checked by access-controlled operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Diamond owner (upgrades, fee-setter appointment, pair removal).
    Owner,
    /// Protocol fee authority.
    FeeSetter,
    /// Per-pool administrator.
    PoolAdmin,
    /// Owner or guardian allowed to toggle the pause switch.
    PauseAuthority,
    /// Account allowed to register new pairs.
    PairCreator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Owner => "owner",
            Self::FeeSetter => "fee-setter",
            Self::PoolAdmin => "pool admin",
            Self::PauseAuthority => "pause authority",
            Self::PairCreator => "pair creator",
        };
        f.write_str(name)
    }
}

/// The single error type of the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DexError {
    // -- validation ---------------------------------------------------------
    /// Both sides of a pair are the same token.
    #[error("identical tokens")]
    IdenticalTokens,

    /// A token, recipient or admin is the null address.
    #[error("zero address")]
    ZeroAddress,

    /// A swap path has fewer than two tokens.
    #[error("invalid path: at least two tokens required")]
    InvalidPath,

    /// The operation's deadline is earlier than the current timestamp.
    #[error("expired: deadline {deadline} is before now {now}")]
    Expired {
        /// Deadline supplied by the caller.
        deadline: u64,
        /// Timestamp of the current operation.
        now: u64,
    },

    /// A fee value is outside its permitted range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A facet cut lists no operations.
    #[error("facet cut has no operations")]
    EmptyFacetCut,

    /// A call payload is not accepted by its target.
    #[error("invalid payload: {0}")]
    InvalidPayload(&'static str),

    /// A registry index is past the end of the pair list.
    #[error("index {index} out of bounds for {len} pairs")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Current list length.
        len: usize,
    },

    /// A configuration document could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- state conflicts ----------------------------------------------------
    /// An added operation is already owned by a facet.
    #[error("operation {0} already exists in the dispatch table")]
    DuplicateOperation(Selector),

    /// The operation is not owned by any facet.
    #[error("operation {0} does not exist in the dispatch table")]
    UnknownOperation(Selector),

    /// A replacement targets the facet that already owns the operation.
    #[error("operation {0} is already owned by the replacement facet")]
    NoOpReplacement(Selector),

    /// A cut assigns an operation the facet cannot execute.
    #[error("facet {facet} cannot execute operation {selector}")]
    UnsupportedOperation {
        /// Facet named by the cut.
        facet: Address,
        /// Offending operation.
        selector: Selector,
    },

    /// A cut names a facet whose address already hosts a different facet.
    #[error("address {0} already hosts a different facet")]
    FacetConflict(Address),

    /// The canonical pair is already registered.
    #[error("pair exists")]
    PairExists,

    /// No pool with the given identity is registered.
    #[error("unknown pool {0}")]
    UnknownPool(Address),

    /// A nested call names an address that hosts no diamond.
    #[error("no diamond at {0}")]
    UnknownTarget(Address),

    /// The layout was already initialised.
    #[error("storage layout already initialised")]
    AlreadyInitialized,

    /// The upgrade's init call failed; the upgrade was rolled back.
    #[error("upgrade init call failed: {0}")]
    InitFailed(Box<DexError>),

    // -- economics ----------------------------------------------------------
    /// A deposit would mint zero liquidity shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A withdrawal would return zero of one token.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// The swap output is zero or below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// The swap input is zero.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// The required input exceeds the caller's maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// The clamped token-A deposit or withdrawal is below its minimum.
    #[error("insufficient A amount")]
    InsufficientAAmount,

    /// The clamped token-B deposit or withdrawal is below its minimum.
    #[error("insufficient B amount")]
    InsufficientBAmount,

    /// A reserve is zero or too small for the requested output.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A quote was requested for a zero amount.
    #[error("insufficient amount")]
    InsufficientAmount,

    /// The fee-adjusted reserve product would decrease.
    #[error("constant product check failed")]
    ConstantProduct,

    /// A token holder's balance is too low.
    #[error("insufficient balance of token {token} for {holder}")]
    InsufficientBalance {
        /// Token being moved.
        token: Address,
        /// Account whose balance is short.
        holder: Address,
    },

    /// A spender's allowance is too low.
    #[error("insufficient allowance of token {token} for spender {spender}")]
    InsufficientAllowance {
        /// Token being moved.
        token: Address,
        /// Spender whose allowance is short.
        spender: Address,
    },

    // -- authority / availability / reentrancy ------------------------------
    /// The caller lacks the role required by the operation.
    #[error("{caller} is not authorised as {role}")]
    Unauthorized {
        /// Required role.
        role: Role,
        /// Rejected caller.
        caller: Address,
    },

    /// The diamond is paused.
    #[error("operation paused")]
    OperationPaused,

    /// A nested call re-entered a locked pool or router.
    #[error("reentrant call")]
    Reentrancy,

    // -- internal -----------------------------------------------------------
    /// An internal invariant does not hold.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),

    /// Arithmetic overflow.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A nested call returned a value of the wrong shape.
    #[error("unexpected return value: expected {0}")]
    UnexpectedReturn(&'static str),
}

impl DexError {
    /// Returns the failure class of this error.
    ///
    /// [`DexError::InitFailed`] reports the class of the wrapped error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IdenticalTokens
            | Self::ZeroAddress
            | Self::InvalidPath
            | Self::Expired { .. }
            | Self::InvalidFee(_)
            | Self::EmptyFacetCut
            | Self::InvalidPayload(_)
            | Self::IndexOutOfBounds { .. }
            | Self::InvalidConfig(_) => ErrorKind::Validation,

            Self::DuplicateOperation(_)
            | Self::UnknownOperation(_)
            | Self::NoOpReplacement(_)
            | Self::UnsupportedOperation { .. }
            | Self::FacetConflict(_)
            | Self::PairExists
            | Self::UnknownPool(_)
            | Self::UnknownTarget(_)
            | Self::AlreadyInitialized => ErrorKind::StateConflict,

            Self::InitFailed(inner) => inner.kind(),

            Self::InsufficientLiquidityMinted
            | Self::InsufficientLiquidityBurned
            | Self::InsufficientOutputAmount
            | Self::InsufficientInputAmount
            | Self::ExcessiveInputAmount
            | Self::InsufficientAAmount
            | Self::InsufficientBAmount
            | Self::InsufficientLiquidity
            | Self::InsufficientAmount
            | Self::ConstantProduct
            | Self::InsufficientBalance { .. }
            | Self::InsufficientAllowance { .. } => ErrorKind::Economic,

            Self::Unauthorized { .. } => ErrorKind::Authority,
            Self::OperationPaused => ErrorKind::Availability,
            Self::Reentrancy => ErrorKind::Reentrancy,

            Self::InvariantViolation(_)
            | Self::Overflow(_)
            | Self::Underflow(_)
            | Self::DivisionByZero
            | Self::UnexpectedReturn(_) => ErrorKind::Internal,
        }
    }

    /// Shorthand for [`DexError::Unauthorized`].
    pub const fn unauthorized(role: Role, caller: Address) -> Self {
        Self::Unauthorized { role, caller }
    }
}

//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_dex::prelude::*;
//! ```
//!
//! Brings in the value types, the call payloads, the configuration
//! structs, the core traits and the runtime.

pub use crate::domain::{Address, Amount, BasisPoints, Event, Liquidity, Selector};

pub use crate::diamond::{
    AddLiquidityParams, Call, Diamond, DiamondCut, FacetCut, RemoveLiquidityParams, Return,
    SwapExactInParams, SwapExactOutParams,
};

pub use crate::traits::{Facet, Host, Layout, TokenLedger};

pub use crate::config::{FactoryConfig, PoolParams, ProtocolFeePolicy, RouterConfig, RuntimeConfig};

pub use crate::error::{DexError, ErrorKind, Result};

pub use crate::ledger::MemoryLedger;
pub use crate::runtime::Runtime;

//! The factory diamond: pool registry, pools and fee governance.
//!
//! Every pool lives inside the factory's [`FactoryLayout`]; a pool's
//! identity is a derived address under which the ledger tracks both its
//! token balances and its liquidity shares.
//!
//! | Facet | Operations |
//! |-------|------------|
//! | [`PairRegistryFacet`] | `createPair`, `getPair`, `allPairs`, `allPairsLength`, `removePair`, `migratePair` |
//! | [`PoolFacet`] | `getReserves`, `pairInfo`, `mint`, `burn`, `swap`, `skim`, `sync` |
//! | [`AccessControlFacet`] | `feeSetter`, `setFeeSetter`, `feeTo`, `setFeeTo`, `setPairCreator`, `isPairCreator`, `protocolFeePolicy`, `setProtocolFeePolicy` |
//! | [`PoolAdminFacet`] | `setPoolAdmin`, `setSwapFee`, `setProtocolFee` |
//! | [`FactoryInitFacet`] | `initFactory` (init call only) |
//!
//! # Usage
//!
//! ```rust
//! use hydra_dex::config::FactoryConfig;
//! use hydra_dex::domain::{Address, Selector};
//! use hydra_dex::factory::standard_cut;
//!
//! let owner = Address::from_low_u64(1);
//! let cut = standard_cut(FactoryConfig::new(owner));
//! assert!(cut.init().is_some());
//! assert!(cut.changes().iter().any(|c| c.selectors().contains(&Selector::CreatePair)));
//! ```

mod access;
mod admin;
mod init;
mod layout;
mod pool;
mod registry;

pub use access::AccessControlFacet;
pub use admin::PoolAdminFacet;
pub use init::FactoryInitFacet;
pub use layout::FactoryLayout;
pub use pool::PoolFacet;
pub use registry::{PairRegistryFacet, pair_address};

use std::sync::Arc;

use crate::config::FactoryConfig;
use crate::diamond::{Call, DiamondCut};
use crate::facets::{LoupeFacet, OwnershipFacet, PausableFacet};

/// The factory's full facet set, initialised with `config`.
#[must_use]
pub fn standard_cut(config: FactoryConfig) -> DiamondCut<FactoryLayout> {
    DiamondCut::new()
        .add(Arc::new(LoupeFacet::new()))
        .add(Arc::new(OwnershipFacet::new()))
        .add(Arc::new(PausableFacet::new()))
        .add(Arc::new(PairRegistryFacet::new()))
        .add(Arc::new(PoolFacet::new()))
        .add(Arc::new(AccessControlFacet::new()))
        .add(Arc::new(PoolAdminFacet::new()))
        .with_init(
            Arc::new(FactoryInitFacet::new()),
            Call::InitFactory(config),
        )
}

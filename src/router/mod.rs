//! The router diamond: quoting, liquidity and multi-hop swaps.
//!
//! The router holds no pools.  Every operation resolves pools through
//! nested calls into its linked factory, pulls the caller's tokens into
//! the first pool on the router's allowance and lets the factory settle.
//! A router-wide flag rejects re-entry while one of its operations runs.
//!
//! | Facet | Operations |
//! |-------|------------|
//! | [`LiquidityRouterFacet`] | `addLiquidity`, `removeLiquidity` |
//! | [`SwapRouterFacet`] | `swapExactTokensForTokens`, `swapTokensForExactTokens` |
//! | [`QuoteRouterFacet`] | `factory`, `getAmountsOut`, `getAmountsIn`, `quote` |
//! | [`RouterInitFacet`] | `initRouter` (init call only) |

mod init;
mod layout;
mod liquidity;
mod quoting;
mod route;
mod swap;

pub use init::RouterInitFacet;
pub use layout::RouterLayout;
pub use liquidity::LiquidityRouterFacet;
pub use quoting::QuoteRouterFacet;
pub use swap::SwapRouterFacet;

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::diamond::{Call, DiamondCut};
use crate::domain::Address;
use crate::facets::{LoupeFacet, OwnershipFacet, PausableFacet};

/// The router's full facet set, linked to `factory`.
#[must_use]
pub fn standard_cut(factory: Address, config: RouterConfig) -> DiamondCut<RouterLayout> {
    DiamondCut::new()
        .add(Arc::new(LoupeFacet::new()))
        .add(Arc::new(OwnershipFacet::new()))
        .add(Arc::new(PausableFacet::new()))
        .add(Arc::new(LiquidityRouterFacet::new()))
        .add(Arc::new(SwapRouterFacet::new()))
        .add(Arc::new(QuoteRouterFacet::new()))
        .with_init(
            Arc::new(RouterInitFacet::new()),
            Call::InitRouter { factory, config },
        )
}

//! # Hydra DEX
//!
//! Constant-product exchange engine built from pluggable facets.
//!
//! Two independently deployed subsystems share one architecture: a
//! **factory** that registers and hosts constant-product pools, and a
//! **router** that quotes, adds and removes liquidity and swaps along
//! multi-hop paths.  Each is a [`Diamond`](diamond::Diamond): one external
//! identity whose operations are routed by [`Selector`](domain::Selector)
//! to independently versioned [`Facet`](traits::Facet)s that all execute
//! against the diamond's single shared storage.  Facets are added,
//! replaced and removed at runtime through atomic upgrades.
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_dex::config::{FactoryConfig, PoolParams, RouterConfig, RuntimeConfig};
//! use hydra_dex::diamond::{AddLiquidityParams, Call, SwapExactInParams};
//! use hydra_dex::domain::{Address, Amount};
//! use hydra_dex::runtime::Runtime;
//! use hydra_dex::traits::TokenLedger;
//!
//! let owner = Address::from_low_u64(1);
//! let alice = Address::from_low_u64(2);
//! let (usdc, weth) = (Address::from_low_u64(0xA), Address::from_low_u64(0xB));
//!
//! // 1. Deploy a factory and a router that creates missing pairs
//! let config = RuntimeConfig::new(
//!     owner,
//!     1_700_000_000,
//!     FactoryConfig::new(owner),
//!     RouterConfig::creating_pairs(PoolParams::default(), owner),
//! )
//! .expect("valid config");
//! let mut rt = Runtime::bootstrap(&config).expect("bootstrap");
//! let router = rt.router_address();
//!
//! // 2. Fund Alice and let the router move her tokens
//! for token in [usdc, weth] {
//!     rt.ledger_mut().mint(token, alice, Amount::new(1_000_000)).expect("mint");
//!     rt.ledger_mut().approve(token, alice, router, Amount::MAX).expect("approve");
//! }
//!
//! // 3. Seed a pool
//! rt.call_router(alice, Call::AddLiquidity(AddLiquidityParams {
//!     token_a: usdc,
//!     token_b: weth,
//!     amount_a_desired: Amount::new(100_000),
//!     amount_b_desired: Amount::new(100_000),
//!     amount_a_min: Amount::ZERO,
//!     amount_b_min: Amount::ZERO,
//!     to: alice,
//!     deadline: u64::MAX,
//! }))
//! .expect("add liquidity");
//!
//! // 4. Swap 1 000 USDC for WETH
//! let amounts = rt
//!     .call_router(alice, Call::SwapExactTokensForTokens(SwapExactInParams {
//!         amount_in: Amount::new(1_000),
//!         amount_out_min: Amount::ZERO,
//!         path: vec![usdc, weth],
//!         to: alice,
//!         deadline: u64::MAX,
//!     }))
//!     .and_then(|r| r.into_amounts())
//!     .expect("swap");
//! assert_eq!(amounts, vec![Amount::new(1_000), Amount::new(987)]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐  Call   ┌──────────────────┐  nested Call  ┌──────────────────┐
//! │  Runtime  │───────▶ │  Router diamond  │─────────────▶ │ Factory diamond  │
//! │  (Host)   │         │  RouterLayout    │               │  FactoryLayout   │
//! └─────┬─────┘         └──────────────────┘               │  pools: Pair ... │
//!       │                                                  └────────┬─────────┘
//!       │                 TokenLedger (balances, allowances,        │
//!       └────────────────  LP shares) ◀─────────────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Selector`](domain::Selector), [`Event`](domain::Event) |
//! | [`diamond`] | Dispatch table, shared storage, upgrades and [`Context`](diamond::Context) |
//! | [`facets`] | Loupe, ownership and pause facets shared by both diamonds |
//! | [`factory`] | Pool registry, pool operations and fee governance |
//! | [`router`] | Liquidity, swap and quote facets |
//! | [`pools`] | The constant-product [`Pair`](pools::Pair) and quote formulas |
//! | [`config`] | Declarative deployment parameters |
//! | [`ledger`] | In-memory [`TokenLedger`](traits::TokenLedger) |
//! | [`runtime`] | Atomic in-process host wiring both diamonds |
//! | [`math`] | Checked and 256-bit arithmetic |
//! | [`error`] | [`DexError`](error::DexError) and its [`ErrorKind`](error::ErrorKind)s |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod diamond;
pub mod domain;
pub mod error;
pub mod facets;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod runtime;
pub mod traits;

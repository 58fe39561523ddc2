//! Declarative configuration for pools, diamonds and the host runtime.
//!
//! Every struct validates in its constructor and exposes `validate()` for
//! values obtained some other way (deserialisation, builders).  With the
//! default `serde` feature all of them load from JSON through
//! [`RuntimeConfig::from_json_str`].

mod factory;
mod pool_params;
mod router;
mod runtime;

pub use factory::{FactoryConfig, ProtocolFeePolicy};
pub use pool_params::PoolParams;
pub use router::RouterConfig;
pub use runtime::RuntimeConfig;

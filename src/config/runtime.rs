//! Whole-deployment configuration.

use super::{FactoryConfig, RouterConfig};
use crate::domain::Address;
use crate::error::{DexError, Result};

/// Everything [`Runtime::bootstrap`](crate::runtime::Runtime::bootstrap)
/// needs to wire a factory and a router.
///
/// With the `serde` feature the config loads from JSON, addresses written
/// as `0x`-prefixed hex:
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use hydra_dex::config::RuntimeConfig;
///
/// let json = r#"{
///     "owner": "0x0000000000000000000000000000000000000001",
///     "genesis_timestamp": 1700000000,
///     "factory": { "fee_setter": "0x0000000000000000000000000000000000000002" },
///     "router": {}
/// }"#;
/// let cfg = RuntimeConfig::from_json_str(json).expect("valid config");
/// assert_eq!(cfg.genesis_timestamp(), 1_700_000_000);
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeConfig {
    owner: Address,
    #[cfg_attr(feature = "serde", serde(default))]
    genesis_timestamp: u64,
    factory: FactoryConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    router: RouterConfig,
}

impl RuntimeConfig {
    /// Creates a validated deployment config.
    ///
    /// # Errors
    ///
    /// Propagates [`RuntimeConfig::validate`] failures.
    pub fn new(
        owner: Address,
        genesis_timestamp: u64,
        factory: FactoryConfig,
        router: RouterConfig,
    ) -> Result<Self> {
        let config = Self {
            owner,
            genesis_timestamp,
            factory,
            router,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON deployment description.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidConfig`] if the document does not parse.
    /// - Any [`RuntimeConfig::validate`] failure.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DexError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the owner and both nested configs.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAddress`] if the owner or fee-setter is unset.
    /// - Any nested config failure.
    pub fn validate(&self) -> Result<()> {
        if self.owner.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        self.factory.validate()?;
        self.router.validate()
    }

    /// Owner of both diamonds.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Clock value at bootstrap.
    #[must_use]
    pub const fn genesis_timestamp(&self) -> u64 {
        self.genesis_timestamp
    }

    /// Factory init parameters.
    #[must_use]
    pub const fn factory(&self) -> &FactoryConfig {
        &self.factory
    }

    /// Router init parameters.
    #[must_use]
    pub const fn router(&self) -> &RouterConfig {
        &self.router
    }
}

//! Router deployment parameters.

use super::PoolParams;
use crate::domain::Address;
use crate::error::{DexError, Result};

/// Parameters consumed by the router's init call.
///
/// When `create_missing_pairs` is set, `addLiquidity` registers a pool
/// for an unknown pair with `default_pool_params` and
/// `default_pool_admin`; otherwise it fails with
/// [`DexError::UnknownPool`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    default_pool_params: PoolParams,
    #[cfg_attr(feature = "serde", serde(default))]
    default_pool_admin: Address,
    #[cfg_attr(feature = "serde", serde(default))]
    create_missing_pairs: bool,
}

impl RouterConfig {
    /// A router that creates missing pairs with the given defaults.
    #[must_use]
    pub const fn creating_pairs(params: PoolParams, admin: Address) -> Self {
        Self {
            default_pool_params: params,
            default_pool_admin: admin,
            create_missing_pairs: true,
        }
    }

    /// A router that only trades on existing pairs.
    #[must_use]
    pub fn existing_pairs_only() -> Self {
        Self {
            default_pool_params: PoolParams::default(),
            default_pool_admin: Address::ZERO,
            create_missing_pairs: false,
        }
    }

    /// Validates the config.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidFee`] if the default params are out of range.
    /// - [`DexError::ZeroAddress`] if pairs are created without an admin.
    pub fn validate(&self) -> Result<()> {
        self.default_pool_params.validate()?;
        if self.create_missing_pairs && self.default_pool_admin.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        Ok(())
    }

    /// Fees of pools created by the router.
    #[must_use]
    pub const fn default_pool_params(&self) -> PoolParams {
        self.default_pool_params
    }

    /// Admin of pools created by the router.
    #[must_use]
    pub const fn default_pool_admin(&self) -> Address {
        self.default_pool_admin
    }

    /// Whether `addLiquidity` registers unknown pairs.
    #[must_use]
    pub const fn create_missing_pairs(&self) -> bool {
        self.create_missing_pairs
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::existing_pairs_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_pairs_only_is_valid() {
        let cfg = RouterConfig::default();
        assert!(!cfg.create_missing_pairs());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn creating_pairs_needs_admin() {
        let cfg = RouterConfig::creating_pairs(PoolParams::default(), Address::ZERO);
        assert_eq!(cfg.validate(), Err(DexError::ZeroAddress));
        let cfg = RouterConfig::creating_pairs(PoolParams::default(), Address::from_low_u64(4));
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.default_pool_admin(), Address::from_low_u64(4));
    }
}

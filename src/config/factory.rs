//! Factory deployment parameters.

use core::fmt;

use crate::domain::Address;
use crate::error::{DexError, Result};

/// When protocol fees accrue.
///
/// Under [`ProtocolFeePolicy::Lazy`] a pool mints the protocol's share of
/// collected swap fees as liquidity shares on its next mint or burn,
/// proportional to the growth of `√k` since the previous accrual.
/// [`ProtocolFeePolicy::Disabled`] never accrues, whatever the pools'
/// protocol fee settings say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProtocolFeePolicy {
    /// Mint protocol shares on the next liquidity event.
    #[default]
    Lazy,
    /// Never accrue protocol fees.
    Disabled,
}

impl fmt::Display for ProtocolFeePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lazy => f.write_str("lazy"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

/// Parameters consumed by the factory's init call.
///
/// # Examples
///
/// ```
/// use hydra_dex::config::{FactoryConfig, ProtocolFeePolicy};
/// use hydra_dex::domain::Address;
///
/// let cfg = FactoryConfig::new(Address::from_low_u64(2))
///     .with_fee_to(Address::from_low_u64(3))
///     .permissionless(true);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.protocol_fee_policy(), ProtocolFeePolicy::Lazy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactoryConfig {
    fee_setter: Address,
    #[cfg_attr(feature = "serde", serde(default))]
    fee_to: Address,
    #[cfg_attr(feature = "serde", serde(default))]
    protocol_fee_policy: ProtocolFeePolicy,
    #[cfg_attr(feature = "serde", serde(default))]
    permissionless_pair_creation: bool,
}

impl FactoryConfig {
    /// Config with the given fee-setter, no fee recipient, lazy fee
    /// accrual and gated pair creation.
    #[must_use]
    pub const fn new(fee_setter: Address) -> Self {
        Self {
            fee_setter,
            fee_to: Address::ZERO,
            protocol_fee_policy: ProtocolFeePolicy::Lazy,
            permissionless_pair_creation: false,
        }
    }

    /// Sets the protocol fee recipient.
    #[must_use]
    pub const fn with_fee_to(mut self, fee_to: Address) -> Self {
        self.fee_to = fee_to;
        self
    }

    /// Sets the protocol-fee accrual policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ProtocolFeePolicy) -> Self {
        self.protocol_fee_policy = policy;
        self
    }

    /// Lets any account create pairs.
    #[must_use]
    pub const fn permissionless(mut self, enabled: bool) -> Self {
        self.permissionless_pair_creation = enabled;
        self
    }

    /// Validates the config.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ZeroAddress`] if the fee-setter is unset.
    pub fn validate(&self) -> Result<()> {
        if self.fee_setter.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        Ok(())
    }

    /// Fee-setter appointed at initialisation.
    #[must_use]
    pub const fn fee_setter(&self) -> Address {
        self.fee_setter
    }

    /// Protocol fee recipient; zero disables protocol fees.
    #[must_use]
    pub const fn fee_to(&self) -> Address {
        self.fee_to
    }

    /// Protocol-fee accrual policy.
    #[must_use]
    pub const fn protocol_fee_policy(&self) -> ProtocolFeePolicy {
        self.protocol_fee_policy
    }

    /// Whether any account may create pairs.
    #[must_use]
    pub const fn permissionless_pair_creation(&self) -> bool {
        self.permissionless_pair_creation
    }
}

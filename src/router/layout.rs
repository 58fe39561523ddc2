//! Storage slots of the router diamond.

use crate::config::RouterConfig;
use crate::domain::Address;
use crate::traits::Layout;

/// The router's linked factory, its defaults and its re-entrancy flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterLayout {
    initialized: bool,
    factory: Address,
    config: RouterConfig,
    locked: bool,
}

impl Layout for RouterLayout {
    const NAME: &'static str = "hydra-dex.router";
    const VERSION: u16 = 1;
}

impl RouterLayout {
    /// Whether the init call ran.
    #[must_use]
    pub const fn initialized(&self) -> bool {
        self.initialized
    }

    /// Factory diamond every route resolves through.
    #[must_use]
    pub const fn factory(&self) -> Address {
        self.factory
    }

    /// Pair-creation defaults.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub(crate) fn initialize(&mut self, factory: Address, config: RouterConfig) {
        self.initialized = true;
        self.factory = factory;
        self.config = config;
    }

    pub(crate) fn lock_flag(&mut self) -> &mut bool {
        &mut self.locked
    }
}

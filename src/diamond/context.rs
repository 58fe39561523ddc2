//! Execution context handed to a facet.

use std::fmt;

use super::{Call, Return, Storage};
use crate::domain::{Address, Event};
use crate::error::Result;
use crate::traits::{Host, Layout, TokenLedger};

/// Everything a facet may touch while executing one operation.
///
/// The context borrows the diamond's storage mutably for the duration of
/// the call and reaches the outside world only through the [`Host`].
pub struct Context<'a, L: Layout> {
    this: Address,
    caller: Address,
    storage: &'a mut Storage<L>,
    host: &'a mut dyn Host,
}

impl<'a, L: Layout> Context<'a, L> {
    pub(crate) fn new(
        this: Address,
        caller: Address,
        storage: &'a mut Storage<L>,
        host: &'a mut dyn Host,
    ) -> Self {
        Self {
            this,
            caller,
            storage,
            host,
        }
    }

    /// Address of the executing diamond.
    #[must_use]
    pub const fn this(&self) -> Address {
        self.this
    }

    /// Account that invoked the operation.
    #[must_use]
    pub const fn caller(&self) -> Address {
        self.caller
    }

    /// Timestamp of the current top-level operation.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.host.now()
    }

    /// The diamond's storage.
    #[must_use]
    pub fn storage(&self) -> &Storage<L> {
        self.storage
    }

    /// The diamond's storage, mutably.
    pub fn storage_mut(&mut self) -> &mut Storage<L> {
        self.storage
    }

    /// Application layout.
    #[must_use]
    pub fn layout(&self) -> &L {
        self.storage.layout()
    }

    /// Application layout, mutably.
    pub fn layout_mut(&mut self) -> &mut L {
        self.storage.layout_mut()
    }

    /// Token ledger.
    pub fn ledger(&mut self) -> &mut dyn TokenLedger {
        self.host.ledger()
    }

    /// Appends to the diamond's event journal.
    pub fn emit(&mut self, event: Event) {
        self.storage.core_mut().emit(event);
    }

    /// Fails unless the caller owns the diamond.
    ///
    /// # Errors
    ///
    /// [`DexError::Unauthorized`](crate::error::DexError::Unauthorized).
    pub fn require_owner(&self) -> Result<()> {
        self.storage.core().require_owner(self.caller)
    }

    /// Calls another diamond with this diamond as the caller.
    ///
    /// # Errors
    ///
    /// Whatever the host or the target raises.
    pub fn call(&mut self, target: Address, call: Call) -> Result<Return> {
        self.host.call(self.this, target, call)
    }
}

impl<L: Layout> fmt::Debug for Context<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("this", &self.this)
            .field("caller", &self.caller)
            .field("now", &self.host.now())
            .finish_non_exhaustive()
    }
}

//! The single storage space of a diamond.

use std::collections::BTreeSet;

use super::DispatchTable;
use crate::domain::{Address, Event};
use crate::error::{DexError, Result, Role};
use crate::traits::Layout;

/// Slots every diamond has regardless of its layout: ownership, the pause
/// switch and the event journal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreSlots {
    owner: Address,
    paused: bool,
    guardians: BTreeSet<Address>,
    events: Vec<Event>,
}

impl CoreSlots {
    /// Slots owned by `owner`, unpaused, with an empty journal.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    /// Current owner.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Whether pausable operations are blocked.
    #[must_use]
    pub const fn paused(&self) -> bool {
        self.paused
    }

    /// Whether `account` holds pause rights besides the owner.
    #[must_use]
    pub fn is_guardian(&self, account: Address) -> bool {
        self.guardians.contains(&account)
    }

    /// Recorded, not yet drained events.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Fails unless `caller` is the owner.
    ///
    /// # Errors
    ///
    /// [`DexError::Unauthorized`] with [`Role::Owner`].
    pub fn require_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            return Err(DexError::unauthorized(Role::Owner, caller));
        }
        Ok(())
    }

    /// Fails unless `caller` is the owner or a guardian.
    ///
    /// # Errors
    ///
    /// [`DexError::Unauthorized`] with [`Role::PauseAuthority`].
    pub fn require_pause_authority(&self, caller: Address) -> Result<()> {
        if caller != self.owner && !self.is_guardian(caller) {
            return Err(DexError::unauthorized(Role::PauseAuthority, caller));
        }
        Ok(())
    }

    pub(crate) fn set_owner(&mut self, owner: Address) {
        self.owner = owner;
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub(crate) fn set_guardian(&mut self, account: Address, enabled: bool) {
        if enabled {
            self.guardians.insert(account);
        } else {
            self.guardians.remove(&account);
        }
    }

    pub(crate) fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

/// Dispatch table, core slots and application layout of one diamond.
///
/// Cloning a `Storage` is how a diamond checkpoints itself: facets are
/// shared behind `Arc`s, every other slot is plain data.
#[derive(Debug, Clone)]
pub struct Storage<L: Layout> {
    dispatch: DispatchTable<L>,
    core: CoreSlots,
    layout: L,
}

impl<L: Layout> Storage<L> {
    /// Fresh storage with no facets and a default layout.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            dispatch: DispatchTable::new(),
            core: CoreSlots::new(owner),
            layout: L::default(),
        }
    }

    /// Dispatch table.
    #[must_use]
    pub const fn dispatch(&self) -> &DispatchTable<L> {
        &self.dispatch
    }

    /// Core slots.
    #[must_use]
    pub const fn core(&self) -> &CoreSlots {
        &self.core
    }

    /// Application layout.
    #[must_use]
    pub const fn layout(&self) -> &L {
        &self.layout
    }

    pub(crate) fn dispatch_mut(&mut self) -> &mut DispatchTable<L> {
        &mut self.dispatch
    }

    pub(crate) fn core_mut(&mut self) -> &mut CoreSlots {
        &mut self.core
    }

    pub(crate) fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_gate() {
        let core = CoreSlots::new(Address::from_low_u64(1));
        assert!(core.require_owner(Address::from_low_u64(1)).is_ok());
        assert_eq!(
            core.require_owner(Address::from_low_u64(2)),
            Err(DexError::unauthorized(Role::Owner, Address::from_low_u64(2)))
        );
    }

    #[test]
    fn guardians_may_pause() {
        let mut core = CoreSlots::new(Address::from_low_u64(1));
        let guardian = Address::from_low_u64(7);
        assert!(core.require_pause_authority(guardian).is_err());
        core.set_guardian(guardian, true);
        assert!(core.require_pause_authority(guardian).is_ok());
        core.set_guardian(guardian, false);
        assert!(!core.is_guardian(guardian));
    }

    #[test]
    fn journal_drains() {
        let mut core = CoreSlots::new(Address::from_low_u64(1));
        core.emit(Event::Paused {
            account: Address::from_low_u64(1),
        });
        assert_eq!(core.events().len(), 1);
        assert_eq!(core.take_events().len(), 1);
        assert!(core.events().is_empty());
    }
}

//! Upgrade batches ("diamond cuts").

use std::fmt;
use std::sync::Arc;

use super::Call;
use crate::domain::{Address, Selector};
use crate::traits::{Facet, Layout};

/// One change to the dispatch table.
///
/// Removal carries no facet: the null-module sentinel of the classic
/// pattern is the absence of a facet here.
pub enum FacetCut<L: Layout> {
    /// Assign currently unowned selectors to `facet`.
    Add {
        /// Facet taking ownership.
        facet: Arc<dyn Facet<L>>,
        /// Selectors to assign.
        selectors: Vec<Selector>,
    },
    /// Move currently owned selectors to a different `facet`.
    Replace {
        /// Facet taking ownership.
        facet: Arc<dyn Facet<L>>,
        /// Selectors to move.
        selectors: Vec<Selector>,
    },
    /// Drop currently owned selectors from the table.
    Remove {
        /// Selectors to drop.
        selectors: Vec<Selector>,
    },
}

impl<L: Layout> FacetCut<L> {
    /// Adds every selector `facet` implements.
    pub fn add_all(facet: Arc<dyn Facet<L>>) -> Self {
        let selectors = facet.selectors().to_vec();
        Self::Add { facet, selectors }
    }

    /// Moves every selector `facet` implements onto it.
    pub fn replace_all(facet: Arc<dyn Facet<L>>) -> Self {
        let selectors = facet.selectors().to_vec();
        Self::Replace { facet, selectors }
    }

    /// Selectors touched by this change.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        match self {
            Self::Add { selectors, .. }
            | Self::Replace { selectors, .. }
            | Self::Remove { selectors } => selectors,
        }
    }

    /// Facet named by this change, if any.
    #[must_use]
    pub fn facet_address(&self) -> Option<Address> {
        match self {
            Self::Add { facet, .. } | Self::Replace { facet, .. } => Some(facet.address()),
            Self::Remove { .. } => None,
        }
    }
}

impl<L: Layout> Clone for FacetCut<L> {
    fn clone(&self) -> Self {
        match self {
            Self::Add { facet, selectors } => Self::Add {
                facet: Arc::clone(facet),
                selectors: selectors.clone(),
            },
            Self::Replace { facet, selectors } => Self::Replace {
                facet: Arc::clone(facet),
                selectors: selectors.clone(),
            },
            Self::Remove { selectors } => Self::Remove {
                selectors: selectors.clone(),
            },
        }
    }
}

impl<L: Layout> fmt::Debug for FacetCut<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Self::Add { .. } => "Add",
            Self::Replace { .. } => "Replace",
            Self::Remove { .. } => "Remove",
        };
        f.debug_struct("FacetCut")
            .field("action", &action)
            .field("facet", &self.facet_address())
            .field("selectors", &self.selectors())
            .finish()
    }
}

/// Initialisation run in the same atomic unit as an upgrade.
pub struct InitCall<L: Layout> {
    /// Facet executing the payload; it does not have to be in the table.
    pub target: Arc<dyn Facet<L>>,
    /// Payload handed to the target.
    pub payload: Call,
}

impl<L: Layout> Clone for InitCall<L> {
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
            payload: self.payload.clone(),
        }
    }
}

impl<L: Layout> fmt::Debug for InitCall<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitCall")
            .field("target", &self.target.address())
            .field("payload", &self.payload.selector())
            .finish()
    }
}

/// An ordered upgrade batch with an optional init call.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use hydra_dex::diamond::DiamondCut;
/// use hydra_dex::facets::OwnershipFacet;
/// use hydra_dex::factory::FactoryLayout;
///
/// let cut: DiamondCut<FactoryLayout> = DiamondCut::new().add(Arc::new(OwnershipFacet::new()));
/// assert_eq!(cut.changes().len(), 1);
/// ```
pub struct DiamondCut<L: Layout> {
    changes: Vec<FacetCut<L>>,
    init: Option<InitCall<L>>,
}

impl<L: Layout> DiamondCut<L> {
    /// Empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
            init: None,
        }
    }

    /// Appends a change.
    #[must_use]
    pub fn with(mut self, change: FacetCut<L>) -> Self {
        self.changes.push(change);
        self
    }

    /// Appends an [`FacetCut::Add`] of every selector `facet` implements.
    #[must_use]
    pub fn add(self, facet: Arc<dyn Facet<L>>) -> Self {
        self.with(FacetCut::add_all(facet))
    }

    /// Sets the init call.
    #[must_use]
    pub fn with_init(mut self, target: Arc<dyn Facet<L>>, payload: Call) -> Self {
        self.init = Some(InitCall { target, payload });
        self
    }

    /// Changes in application order.
    #[must_use]
    pub fn changes(&self) -> &[FacetCut<L>] {
        &self.changes
    }

    /// Init call, if any.
    #[must_use]
    pub const fn init(&self) -> Option<&InitCall<L>> {
        self.init.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Vec<FacetCut<L>>, Option<InitCall<L>>) {
        (self.changes, self.init)
    }
}

impl<L: Layout> Default for DiamondCut<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Layout> Clone for DiamondCut<L> {
    fn clone(&self) -> Self {
        Self {
            changes: self.changes.clone(),
            init: self.init.clone(),
        }
    }
}

impl<L: Layout> fmt::Debug for DiamondCut<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiamondCut")
            .field("changes", &self.changes)
            .field("init", &self.init)
            .finish()
    }
}

/// Selectors affected by an applied batch, for the journal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutSummary {
    /// Newly assigned.
    pub added: Vec<Selector>,
    /// Moved to another facet.
    pub replaced: Vec<Selector>,
    /// Dropped.
    pub removed: Vec<Selector>,
}

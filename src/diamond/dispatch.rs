//! Selector-to-facet dispatch table with loupe introspection.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{CutSummary, FacetCut};
use crate::domain::{Address, Selector};
use crate::error::{DexError, Result};
use crate::traits::{Facet, Layout};

/// Loupe view of one facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetInfo {
    /// Facet identity.
    pub address: Address,
    /// Facet name.
    pub name: &'static str,
    /// Owned selectors in assignment order.
    pub selectors: Vec<Selector>,
}

struct Entry<L: Layout> {
    facet: Arc<dyn Facet<L>>,
    selectors: Vec<Selector>,
}

impl<L: Layout> Clone for Entry<L> {
    fn clone(&self) -> Self {
        Self {
            facet: Arc::clone(&self.facet),
            selectors: self.selectors.clone(),
        }
    }
}

/// Which facet owns which selector.
///
/// # Invariants
///
/// - Every selector is owned by at most one facet.
/// - A facet is listed only while it owns at least one selector.
/// - An address identifies one facet implementation: while listed, every
///   selector routed to it runs on the facet first cut in there.
/// - [`DispatchTable::apply`] is all-or-nothing: a failing batch leaves
///   the table exactly as it was.
pub struct DispatchTable<L: Layout> {
    owners: BTreeMap<Selector, Address>,
    entries: BTreeMap<Address, Entry<L>>,
    order: Vec<Address>,
}

impl<L: Layout> DispatchTable<L> {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owners: BTreeMap::new(),
            entries: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Facet that executes `selector`.
    #[must_use]
    pub fn resolve(&self, selector: Selector) -> Option<Arc<dyn Facet<L>>> {
        let address = self.owners.get(&selector)?;
        self.entries.get(address).map(|e| Arc::clone(&e.facet))
    }

    /// Address of the facet owning `selector`.
    #[must_use]
    pub fn facet_address(&self, selector: Selector) -> Option<Address> {
        self.owners.get(&selector).copied()
    }

    /// Selectors owned by `facet`; empty for an unknown facet.
    #[must_use]
    pub fn facet_selectors(&self, facet: Address) -> Vec<Selector> {
        self.entries
            .get(&facet)
            .map(|e| e.selectors.clone())
            .unwrap_or_default()
    }

    /// Facet addresses in the order they were first cut in.
    #[must_use]
    pub fn facet_addresses(&self) -> Vec<Address> {
        self.order.clone()
    }

    /// Every facet with its selectors.
    #[must_use]
    pub fn facets(&self) -> Vec<FacetInfo> {
        self.order
            .iter()
            .filter_map(|address| self.entries.get(address))
            .map(|e| FacetInfo {
                address: e.facet.address(),
                name: e.facet.name(),
                selectors: e.selectors.clone(),
            })
            .collect()
    }

    /// Number of routed selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether nothing is routed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Applies a batch of changes atomically.
    ///
    /// # Errors
    ///
    /// - [`DexError::EmptyFacetCut`] if a change lists no selectors.
    /// - [`DexError::ZeroAddress`] if an added or replacing facet has the
    ///   null address.
    /// - [`DexError::UnsupportedOperation`] if a facet is handed a
    ///   selector it does not implement.
    /// - [`DexError::DuplicateOperation`] when adding an owned selector.
    /// - [`DexError::UnknownOperation`] when replacing or removing an
    ///   unowned selector.
    /// - [`DexError::NoOpReplacement`] when replacing a selector with the
    ///   facet that already owns it.
    /// - [`DexError::FacetConflict`] when a facet is cut in at an address
    ///   that already hosts a different facet.
    pub fn apply(&mut self, changes: &[FacetCut<L>]) -> Result<CutSummary> {
        let mut next = self.clone();
        let mut summary = CutSummary::default();
        for change in changes {
            next.apply_one(change, &mut summary)?;
        }
        *self = next;
        Ok(summary)
    }

    fn apply_one(&mut self, change: &FacetCut<L>, summary: &mut CutSummary) -> Result<()> {
        if change.selectors().is_empty() {
            return Err(DexError::EmptyFacetCut);
        }
        match change {
            FacetCut::Add { facet, selectors } => {
                check_facet(facet.as_ref(), selectors)?;
                for &selector in selectors {
                    if self.owners.contains_key(&selector) {
                        return Err(DexError::DuplicateOperation(selector));
                    }
                    self.assign(facet, selector)?;
                    summary.added.push(selector);
                }
            }
            FacetCut::Replace { facet, selectors } => {
                check_facet(facet.as_ref(), selectors)?;
                for &selector in selectors {
                    let Some(&current) = self.owners.get(&selector) else {
                        return Err(DexError::UnknownOperation(selector));
                    };
                    if current == facet.address() {
                        return Err(DexError::NoOpReplacement(selector));
                    }
                    self.unassign(current, selector);
                    self.assign(facet, selector)?;
                    summary.replaced.push(selector);
                }
            }
            FacetCut::Remove { selectors } => {
                for &selector in selectors {
                    let Some(current) = self.owners.remove(&selector) else {
                        return Err(DexError::UnknownOperation(selector));
                    };
                    self.unassign(current, selector);
                    summary.removed.push(selector);
                }
            }
        }
        Ok(())
    }

    fn assign(&mut self, facet: &Arc<dyn Facet<L>>, selector: Selector) -> Result<()> {
        let address = facet.address();
        if let Some(existing) = self.entries.get(&address)
            && !same_facet(existing.facet.as_ref(), facet.as_ref())
        {
            return Err(DexError::FacetConflict(address));
        }
        self.owners.insert(selector, address);
        let entry = self.entries.entry(address).or_insert_with(|| Entry {
            facet: Arc::clone(facet),
            selectors: Vec::new(),
        });
        entry.selectors.push(selector);
        if !self.order.contains(&address) {
            self.order.push(address);
        }
        Ok(())
    }

    fn unassign(&mut self, facet: Address, selector: Selector) {
        self.owners.remove(&selector);
        let emptied = match self.entries.get_mut(&facet) {
            Some(entry) => {
                entry.selectors.retain(|s| *s != selector);
                entry.selectors.is_empty()
            }
            None => false,
        };
        if emptied {
            self.entries.remove(&facet);
            self.order.retain(|a| *a != facet);
        }
    }
}

fn check_facet<L: Layout>(facet: &dyn Facet<L>, selectors: &[Selector]) -> Result<()> {
    let address = facet.address();
    if address.is_zero() {
        return Err(DexError::ZeroAddress);
    }
    let supported = facet.selectors();
    if let Some(&selector) = selectors.iter().find(|s| !supported.contains(*s)) {
        return Err(DexError::UnsupportedOperation {
            facet: address,
            selector,
        });
    }
    Ok(())
}

/// Two handles name the same facet when they agree on name and selectors.
fn same_facet<L: Layout>(a: &dyn Facet<L>, b: &dyn Facet<L>) -> bool {
    a.name() == b.name() && a.selectors() == b.selectors()
}

impl<L: Layout> Default for DispatchTable<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Layout> Clone for DispatchTable<L> {
    fn clone(&self) -> Self {
        Self {
            owners: self.owners.clone(),
            entries: self.entries.clone(),
            order: self.order.clone(),
        }
    }
}

impl<L: Layout> PartialEq for DispatchTable<L> {
    /// Tables are equal when they route every selector to the same facet
    /// address in the same listing order.
    fn eq(&self, other: &Self) -> bool {
        self.owners == other.owners && self.facets() == other.facets()
    }
}

impl<L: Layout> fmt::Debug for DispatchTable<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.owners.iter().map(|(s, a)| (s.name(), a)))
            .finish()
    }
}

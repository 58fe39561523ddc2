//! Execution modules behind a diamond's dispatch table.

use core::fmt;

use super::Layout;
use crate::diamond::{Call, Context, Return};
use crate::domain::{Address, Selector};
use crate::error::Result;

/// An independently versioned unit of behaviour sharing one diamond's
/// storage.
///
/// A facet is stateless: everything it reads or writes goes through the
/// [`Context`] handed to [`Facet::execute`].  Its identity is its
/// [`address`](Facet::address); two builds of the same facet at different
/// addresses are different modules as far as upgrades are concerned.
///
/// # Contract
///
/// - [`Facet::selectors`] lists every operation the facet can execute.  A
///   cut assigning any other selector to it fails with
///   [`DexError::UnsupportedOperation`](crate::error::DexError::UnsupportedOperation).
/// - [`Facet::execute`] is only ever called with a [`Call`] whose selector
///   is in that list, but must still reject anything else with
///   [`DexError::UnknownOperation`](crate::error::DexError::UnknownOperation).
/// - On error the facet may leave storage half-written; the diamond
///   restores its checkpoint.
pub trait Facet<L: Layout>: fmt::Debug + Send + Sync {
    /// Module identity.
    fn address(&self) -> Address;

    /// Human-readable name for logs.
    fn name(&self) -> &'static str;

    /// Operations this facet implements.
    fn selectors(&self) -> &'static [Selector];

    /// Runs one operation against the diamond's storage.
    ///
    /// # Errors
    ///
    /// Any [`DexError`](crate::error::DexError) the operation raises.
    fn execute(&self, ctx: &mut Context<'_, L>, call: Call) -> Result<Return>;
}

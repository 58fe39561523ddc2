//! Storage layout contract shared by every facet of a diamond.

use core::fmt;

/// The application slots of a diamond's storage.
///
/// One layout type exists per diamond kind (factory, router).  Every facet
/// cut into a diamond is generic over, or written for, that layout, so all
/// of them observe and mutate the same fields.  The layout is cloned to
/// checkpoint the diamond before each operation, which is how failed
/// operations discard their writes.
///
/// `NAME` and `VERSION` identify the layout revision; a facet built for a
/// different revision must not be cut in.
pub trait Layout: Clone + fmt::Debug + Default + Send + Sync + 'static {
    /// Layout name, reported by [`Event::Initialized`](crate::domain::Event::Initialized).
    const NAME: &'static str;

    /// Layout revision.
    const VERSION: u16;
}

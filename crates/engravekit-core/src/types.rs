//! Shared type aliases.

/// A boxed iterator, used where the concrete iterator type depends on a
/// runtime condition (for example, scan direction).
pub type BoxedIterator<T> = Box<dyn Iterator<Item = T>>;

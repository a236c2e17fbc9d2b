//! Publishers that originate signals.

/// Callback-driven source.
mod create_source;
/// Immediately failing source.
mod failed_source;
/// Periodic source driven by a scheduler.
mod interval_source;
/// Source draining a cloneable iterator.
mod iterator_source;
/// Source that never signals.
mod never_source;

pub(crate) use create_source::CreateSource;
pub(crate) use failed_source::FailedSource;
pub(crate) use interval_source::IntervalSource;
pub(crate) use iterator_source::IteratorSource;
pub(crate) use never_source::NeverSource;

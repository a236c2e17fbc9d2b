//! Publishers composed over an upstream publisher.

/// Ordered concatenation of publishers.
mod concat_publisher;
/// Per-value spacing.
mod delay_elements_publisher;
/// Whole-sequence time shift.
mod delay_sequence_publisher;
/// Predicate filtering.
mod filter_publisher;
/// Value transformation.
mod map_publisher;
/// Prefix limiting.
mod take_publisher;

pub(crate) use concat_publisher::ConcatPublisher;
pub(crate) use delay_elements_publisher::DelayElementsPublisher;
pub(crate) use delay_sequence_publisher::DelaySequencePublisher;
pub(crate) use filter_publisher::FilterPublisher;
pub(crate) use map_publisher::MapPublisher;
pub(crate) use take_publisher::TakePublisher;

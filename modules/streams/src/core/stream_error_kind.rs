//! Coarse classification of stream errors.

/// Kind of a [`StreamError`](crate::core::StreamError), used to assert errors without matching
/// on their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamErrorKind {
  /// Value emitted without outstanding demand.
  DemandExceeded,
  /// Zero-element request.
  NonPositiveRequest,
  /// Null value where nulls are not allowed.
  NullValue,
  /// Signal emitted after termination. Only custom publishers raise it.
  SignalAfterTerminal,
  /// Domain error from a publisher or operator function.
  Upstream,
  /// Synchronous collection did not observe a terminal signal.
  NotTerminated,
}

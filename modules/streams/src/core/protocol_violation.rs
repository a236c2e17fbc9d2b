//! Reactive-streams protocol violations.

/// Breaches of the publisher/subscriber contract.
///
/// Violations are fatal to the subscription that observed them and are delivered downstream as
/// an error signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ProtocolViolation {
  /// A value was emitted while outstanding demand was zero.
  #[error("value emitted without outstanding demand")]
  DemandExceeded,
  /// A subscriber requested zero elements.
  #[error("request amount must be positive")]
  NonPositiveRequest,
  /// A null value reached a stage that does not accept nulls.
  #[error("null value where nulls are not allowed")]
  NullValue,
  /// A signal was emitted after the stream had already terminated.
  ///
  /// Reserved for custom publishers that report the breach. The built-in stages never raise it:
  /// they drop late signals and count dropped values.
  #[error("signal emitted after a terminal signal")]
  SignalAfterTerminal,
}

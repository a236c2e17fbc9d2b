//! Tick driver failures.

/// Reasons a [`TokioTickDriver`](super::TokioTickDriver) cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TickDriverError {
  /// No tokio runtime is active on the calling thread.
  #[error("no tokio runtime available")]
  NoRuntime,
  /// The tick resolution was zero.
  #[error("tick resolution must be positive")]
  ZeroResolution,
}

//! Verification failures.

use alloc::string::String;
use core::time::Duration;

/// Reason a verification script failed. `step` is the zero-based index of the failing step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
  /// A different signal arrived than the step expected.
  #[error("step {step}: expected {expected}, got {actual}")]
  UnexpectedSignal {
    /// Failing step.
    step:     usize,
    /// Expected signal.
    expected: String,
    /// Received signal.
    actual:   String,
  },
  /// No signal was buffered when the step needed one.
  #[error("step {step}: expected {expected}, got nothing")]
  MissingSignal {
    /// Failing step.
    step:     usize,
    /// Expected signal.
    expected: String,
  },
  /// A signal arrived inside a no-event window.
  #[error("step {step}: expected no event for {window:?}, got {actual}")]
  UnexpectedEvent {
    /// Failing step.
    step:   usize,
    /// First received signal.
    actual: String,
    /// Length of the window.
    window: Duration,
  },
  /// The publisher never called `on_subscribe`.
  #[error("step {step}: expected a subscription")]
  MissingSubscription {
    /// Failing step.
    step: usize,
  },
  /// The dropped-value count differs from the expectation.
  #[error("expected {expected} dropped values, found {actual}")]
  DroppedCountMismatch {
    /// Expected count.
    expected: u64,
    /// Observed count.
    actual:   u64,
  },
  /// The verification took at least the allowed time.
  #[error("expected verification to take less than {limit:?}, took {elapsed:?}")]
  TookTooLong {
    /// Allowed duration (exclusive).
    limit:   Duration,
    /// Measured duration.
    elapsed: Duration,
  },
}

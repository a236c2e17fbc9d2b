//! Monotonic clock abstraction.

use core::time::Duration;

/// Source of monotonically increasing time, measured from an arbitrary origin.
pub trait MonotonicClock: Send + Sync {
  /// Returns the time elapsed since the clock's origin.
  fn now(&self) -> Duration;
}

//! Post-verification statistics.


use core::time::Duration;

use super::VerificationError;

/// Statistics captured once a verification script finished.
///
/// The assertion helpers return `Result<&Self, _>` so they chain with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationReport {
  dropped_count:   u64,
  virtual_elapsed: Duration,
  wall_elapsed:    Option<Duration>,
}

impl VerificationReport {
  pub(crate) const fn new(dropped_count: u64, virtual_elapsed: Duration, wall_elapsed: Option<Duration>) -> Self {
    Self { dropped_count, virtual_elapsed, wall_elapsed }
  }

  /// Returns the number of values the subscription dropped.
  #[must_use]
  pub const fn dropped_count(&self) -> u64 {
    self.dropped_count
  }

  /// Returns the logical time that passed on the verifier's scheduler.
  #[must_use]
  pub const fn virtual_elapsed(&self) -> Duration {
    self.virtual_elapsed
  }

  /// Returns the measured wall-clock time, when a wall clock was configured.
  #[must_use]
  pub const fn wall_elapsed(&self) -> Option<Duration> {
    self.wall_elapsed
  }

  /// Returns the wall-clock time if measured, the logical time otherwise.
  #[must_use]
  pub fn elapsed(&self) -> Duration {
    self.wall_elapsed.unwrap_or(self.virtual_elapsed)
  }

  /// Checks that exactly `expected` values were dropped.
  ///
  /// # Errors
  ///
  /// Returns [`VerificationError::DroppedCountMismatch`] otherwise.
  pub fn has_dropped(&self, expected: u64) -> Result<&Self, VerificationError> {
    if self.dropped_count == expected {
      Ok(self)
    } else {
      Err(VerificationError::DroppedCountMismatch { expected, actual: self.dropped_count })
    }
  }

  /// Checks that nothing was dropped.
  ///
  /// # Errors
  ///
  /// Returns [`VerificationError::DroppedCountMismatch`] otherwise.
  pub fn has_not_dropped(&self) -> Result<&Self, VerificationError> {
    self.has_dropped(0)
  }

  /// Checks that [`elapsed`](Self::elapsed) is strictly below `limit`.
  ///
  /// # Errors
  ///
  /// Returns [`VerificationError::TookTooLong`] otherwise.
  pub fn took_less_than(&self, limit: Duration) -> Result<&Self, VerificationError> {
    let elapsed = self.elapsed();
    if elapsed < limit { Ok(self) } else { Err(VerificationError::TookTooLong { limit, elapsed }) }
  }
}

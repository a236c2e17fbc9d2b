//! Demand fuzzing outcome.

/// Counts gathered by a [`DemandFuzzRunner`](super::DemandFuzzRunner) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandFuzzReport {
  attempted: u64,
  observed:  u64,
  dropped:   u64,
}

impl DemandFuzzReport {
  pub(crate) const fn new(attempted: u64, observed: u64, dropped: u64) -> Self {
    Self { attempted, observed, dropped }
  }

  /// Values the publisher tried to emit.
  #[must_use]
  pub const fn attempted(&self) -> u64 {
    self.attempted
  }

  /// Values the subscriber received.
  #[must_use]
  pub const fn observed(&self) -> u64 {
    self.observed
  }

  /// Values the subscription dropped.
  #[must_use]
  pub const fn dropped(&self) -> u64 {
    self.dropped
  }

  /// Returns `true` when every attempted value was either observed or dropped.
  #[must_use]
  pub const fn is_balanced(&self) -> bool {
    self.observed.saturating_add(self.dropped) == self.attempted
  }
}

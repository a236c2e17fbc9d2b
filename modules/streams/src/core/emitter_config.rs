//! Configuration for emitter-backed subscriptions.

/// Overflow behaviour of an emitter-backed subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterConfig {
  strict_on_overflow_demand: bool,
}

impl EmitterConfig {
  /// Creates a configuration.
  #[must_use]
  pub const fn new(strict_on_overflow_demand: bool) -> Self {
    Self { strict_on_overflow_demand }
  }

  /// Returns `true` when emitting beyond demand fails the subscription instead of dropping the
  /// value.
  #[must_use]
  pub const fn strict_on_overflow_demand(&self) -> bool {
    self.strict_on_overflow_demand
  }

  /// Updates the overflow policy.
  #[must_use]
  pub const fn with_strict_on_overflow_demand(mut self, strict: bool) -> Self {
    self.strict_on_overflow_demand = strict;
    self
  }
}

impl Default for EmitterConfig {
  fn default() -> Self {
    Self { strict_on_overflow_demand: true }
  }
}

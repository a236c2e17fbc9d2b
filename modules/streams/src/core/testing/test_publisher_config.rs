//! Test publisher configuration.

/// Controls how far a [`TestPublisher`](super::TestPublisher) may deviate from the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestPublisherConfig {
  allow_null:                bool,
  strict_on_overflow_demand: bool,
}

impl TestPublisherConfig {
  /// Creates a configuration.
  #[must_use]
  pub const fn new(allow_null: bool, strict_on_overflow_demand: bool) -> Self {
    Self { allow_null, strict_on_overflow_demand }
  }

  /// Returns `true` when null emissions are tolerated until the next completion.
  #[must_use]
  pub const fn allow_null(&self) -> bool {
    self.allow_null
  }

  /// Returns `true` when emitting without demand fails the subscription.
  #[must_use]
  pub const fn strict_on_overflow_demand(&self) -> bool {
    self.strict_on_overflow_demand
  }

  /// Updates the null policy.
  #[must_use]
  pub const fn with_allow_null(mut self, allow_null: bool) -> Self {
    self.allow_null = allow_null;
    self
  }

  /// Updates the overflow policy.
  #[must_use]
  pub const fn with_strict_on_overflow_demand(mut self, strict: bool) -> Self {
    self.strict_on_overflow_demand = strict;
    self
  }
}

impl Default for TestPublisherConfig {
  fn default() -> Self {
    Self::new(false, true)
  }
}

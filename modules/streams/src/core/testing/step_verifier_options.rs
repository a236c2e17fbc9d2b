//! Verifier options.

use crate::core::Demand;

/// Options applied when a [`StepVerifier`](super::StepVerifier) subscribes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepVerifierOptions {
  initial_demand: Demand,
}

impl StepVerifierOptions {
  /// Creates options requesting unbounded demand on subscribe.
  #[must_use]
  pub const fn new() -> Self {
    Self { initial_demand: Demand::Unbounded }
  }

  /// Returns the demand requested on subscribe.
  #[must_use]
  pub const fn initial_demand(&self) -> Demand {
    self.initial_demand
  }

  /// Requests `amount` on subscribe; zero requests nothing and `u64::MAX` is unbounded.
  #[must_use]
  pub const fn with_initial_demand(mut self, amount: u64) -> Self {
    self.initial_demand = Demand::from_request(amount);
    self
  }
}

impl Default for StepVerifierOptions {
  fn default() -> Self {
    Self::new()
  }
}

//! Wall-clock time source.

extern crate std;

#[cfg(test)]
mod tests;

use core::time::Duration;
use std::time::Instant;

use crate::core::MonotonicClock;

/// Real time elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct StdMonotonicClock {
  origin: Instant,
}

impl StdMonotonicClock {
  /// Starts a clock at zero.
  #[must_use]
  pub fn new() -> Self {
    Self { origin: Instant::now() }
  }
}

impl Default for StdMonotonicClock {
  fn default() -> Self {
    Self::new()
  }
}

impl MonotonicClock for StdMonotonicClock {
  fn now(&self) -> Duration {
    self.origin.elapsed()
  }
}

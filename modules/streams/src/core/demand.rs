//! Demand model used for backpressure.

#[cfg(test)]
mod tests;

use core::fmt;

/// Demand signal used for backpressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demand {
  /// Finite demand with remaining count.
  Finite(u64),
  /// Unbounded demand.
  Unbounded,
}

impl Demand {
  /// Request amount interpreted as unbounded demand.
  pub const UNBOUNDED_REQUEST: u64 = u64::MAX;

  /// Converts a raw request amount into a demand value.
  #[must_use]
  pub const fn from_request(amount: u64) -> Self {
    if amount == Self::UNBOUNDED_REQUEST { Self::Unbounded } else { Self::Finite(amount) }
  }

  /// Returns `true` if the demand is unbounded.
  #[must_use]
  pub const fn is_unbounded(&self) -> bool {
    matches!(self, Self::Unbounded)
  }

  /// Returns `true` if there is remaining demand.
  #[must_use]
  pub const fn has_demand(&self) -> bool {
    matches!(self, Self::Unbounded) || matches!(self, Self::Finite(remaining) if *remaining > 0)
  }

  /// Returns the remaining finite demand, if any.
  #[must_use]
  pub const fn remaining(&self) -> Option<u64> {
    match self {
      | Self::Finite(value) => Some(*value),
      | Self::Unbounded => None,
    }
  }

  /// Returns the raw request amount that re-creates this demand upstream.
  #[must_use]
  pub const fn as_request(&self) -> u64 {
    match self {
      | Self::Finite(value) => *value,
      | Self::Unbounded => Self::UNBOUNDED_REQUEST,
    }
  }
}

impl fmt::Display for Demand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Finite(value) => write!(f, "{value}"),
      | Self::Unbounded => f.write_str("unbounded"),
    }
  }
}

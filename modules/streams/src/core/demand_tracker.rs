//! Demand tracker implementation.


use crate::core::{demand::Demand, protocol_violation::ProtocolViolation};

/// Tracks outstanding downstream demand.
///
/// Demand saturates at [`Demand::Unbounded`]; once unbounded, consuming never decrements it.
#[derive(Debug, Clone)]
pub struct DemandTracker {
  current: Demand,
}

impl DemandTracker {
  /// Creates a new demand tracker with zero demand.
  #[must_use]
  pub const fn new() -> Self {
    Self { current: Demand::Finite(0) }
  }

  /// Returns the current demand value.
  #[must_use]
  pub const fn current(&self) -> Demand {
    self.current
  }

  /// Adds demand to the tracker. `u64::MAX` switches the tracker to unbounded demand.
  ///
  /// # Errors
  ///
  /// Returns [`ProtocolViolation::NonPositiveRequest`] when `amount` is zero.
  pub const fn request(&mut self, amount: u64) -> Result<Demand, ProtocolViolation> {
    if amount == 0 {
      return Err(ProtocolViolation::NonPositiveRequest);
    }

    self.current = match (self.current, Demand::from_request(amount)) {
      | (Demand::Unbounded, _) | (_, Demand::Unbounded) => Demand::Unbounded,
      | (Demand::Finite(current), Demand::Finite(amount)) => match current.checked_add(amount) {
        | Some(total) if total < Demand::UNBOUNDED_REQUEST => Demand::Finite(total),
        | _ => Demand::Unbounded,
      },
    };
    Ok(self.current)
  }

  /// Consumes a single unit of demand when available.
  #[must_use]
  pub const fn consume_one(&mut self) -> bool {
    match self.current {
      | Demand::Unbounded => true,
      | Demand::Finite(value) if value > 0 => {
        self.current = Demand::Finite(value - 1);
        true
      },
      | Demand::Finite(_) => false,
    }
  }
}

impl Default for DemandTracker {
  fn default() -> Self {
    Self::new()
  }
}

//! Identifier assigned to scheduled actions.

use core::fmt;

/// Identifies an action queued on a [`VirtualScheduler`](super::VirtualScheduler).
///
/// Identifiers are unique per scheduler and never reused.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerHandleId(u64);

impl TimerHandleId {
  pub(crate) const fn new(raw: u64) -> Self {
    Self(raw)
  }

  /// Returns the raw value.
  #[must_use]
  pub const fn raw(&self) -> u64 {
    self.0
  }
}

impl fmt::Display for TimerHandleId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "timer-{}", self.0)
  }
}

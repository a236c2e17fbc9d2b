//! Lifecycle of a subscription.

/// Lifecycle phase of a demand-tracking subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
  /// Signals may still be delivered.
  Active,
  /// A completion signal was accepted.
  Completed,
  /// An error signal was accepted.
  Failed,
  /// The subscriber cancelled.
  Cancelled,
}

impl SubscriptionState {
  /// Returns `true` for every phase except [`SubscriptionState::Active`].
  #[must_use]
  pub const fn is_terminated(&self) -> bool {
    !matches!(self, Self::Active)
  }
}

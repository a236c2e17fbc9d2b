//! Control surface behind a [`Subscription`](crate::core::Subscription) handle.

use crate::core::demand::Demand;

/// Operations a subscriber may perform on its subscription.
///
/// Implementations must tolerate re-entrant calls made from inside subscriber callbacks.
pub trait SubscriptionControl: Send + Sync {
  /// Adds `amount` to the outstanding demand. `u64::MAX` requests unbounded demand.
  fn request(&self, amount: u64);

  /// Cancels the subscription. Signals produced afterwards are dropped.
  fn cancel(&self);

  /// Returns `true` once the subscriber cancelled.
  fn is_cancelled(&self) -> bool;

  /// Returns `true` once the subscription completed, failed or was cancelled.
  fn is_terminated(&self) -> bool;

  /// Returns the outstanding demand.
  fn demand(&self) -> Demand;

  /// Returns the number of values produced but never delivered.
  fn dropped_count(&self) -> u64;
}

//! Publisher abstraction.

use alloc::boxed::Box;

use crate::core::{subscriber::Subscriber, subscription::Subscription};

/// Reusable description of an asynchronous producer of signals.
///
/// Every call to [`Publisher::subscribe`] starts an independent activation bound to exactly one
/// subscriber.
pub trait Publisher<T>: Send + Sync {
  /// Starts a new activation delivering to `subscriber`.
  fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Subscription;
}

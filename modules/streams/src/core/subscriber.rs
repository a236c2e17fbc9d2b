//! Consumer callbacks.

use crate::core::{stream_error::StreamError, subscription::Subscription};

/// Consumer of a stream.
///
/// A publisher calls [`Subscriber::on_subscribe`] exactly once before any other callback, then
/// any number of [`Subscriber::on_next`] calls bounded by the requested demand, then at most one
/// of [`Subscriber::on_complete`] or [`Subscriber::on_error`].
pub trait Subscriber<T>: Send {
  /// Receives the subscription handle before any signal is delivered.
  fn on_subscribe(&mut self, _subscription: &Subscription) {}

  /// Receives a value.
  fn on_next(&mut self, value: T);

  /// Receives the failure that terminates the stream.
  fn on_error(&mut self, error: StreamError);

  /// Receives the successful termination of the stream.
  fn on_complete(&mut self);
}

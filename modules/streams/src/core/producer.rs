//! Producer side of a demand-tracking subscription.

use crate::core::emitter::Emitter;

/// Source logic driven by a demand-tracking subscription.
pub trait Producer<T>: Send {
  /// Called once the subscriber is attached and again after every demand change.
  ///
  /// Implementations emit at most [`Emitter::requested`] values and must check
  /// [`Emitter::is_terminated`] before producing each one.
  fn produce(&mut self, emitter: &Emitter<T>);

  /// Called once when the subscriber cancels.
  fn on_cancel(&mut self) {}
}

//! Plain message error used for ad-hoc upstream failures.

use alloc::string::String;

/// Error carrying nothing but a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MessageError {
  message: String,
}

impl MessageError {
  /// Creates a new message error.
  #[must_use]
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }

  /// Returns the message.
  #[must_use]
  pub fn message(&self) -> &str {
    &self.message
  }
}

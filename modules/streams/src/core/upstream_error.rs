//! Domain errors raised by publishers or operator functions.


use alloc::sync::Arc;
use core::{error::Error, fmt};

use crate::core::message_error::MessageError;

/// Domain error propagated downstream as a terminal signal.
///
/// Wraps any error type behind a shared pointer so that signals stay cheap to clone. The
/// original type can be recovered with [`UpstreamError::downcast_ref`].
#[derive(Clone)]
pub struct UpstreamError {
  inner: Arc<dyn Error + Send + Sync + 'static>,
}

impl UpstreamError {
  /// Wraps an arbitrary error.
  #[must_use]
  pub fn new<E>(error: E) -> Self
  where
    E: Error + Send + Sync + 'static, {
    Self { inner: Arc::new(error) }
  }

  /// Creates an upstream error that only carries a message.
  #[must_use]
  pub fn message(message: impl Into<alloc::string::String>) -> Self {
    Self::new(MessageError::new(message))
  }

  /// Returns a reference to the wrapped error when it is of type `E`.
  #[must_use]
  pub fn downcast_ref<E>(&self) -> Option<&E>
  where
    E: Error + 'static, {
    self.inner.downcast_ref::<E>()
  }

  /// Returns `true` when the wrapped error is of type `E`.
  #[must_use]
  pub fn is<E>(&self) -> bool
  where
    E: Error + 'static, {
    self.inner.is::<E>()
  }
}

impl fmt::Debug for UpstreamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("UpstreamError").field(&self.inner).finish()
  }
}

impl fmt::Display for UpstreamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.inner, f)
  }
}

impl Error for UpstreamError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    self.inner.source()
  }
}

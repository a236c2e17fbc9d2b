//! Stream error definitions.


use core::error::Error;

use crate::core::{
  protocol_violation::ProtocolViolation, stream_error_kind::StreamErrorKind, upstream_error::UpstreamError,
};

/// Cause carried by an error signal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StreamError {
  /// The publisher/subscriber contract was broken.
  #[error("protocol violation: {0}")]
  Protocol(#[from] ProtocolViolation),
  /// A publisher or operator function failed.
  #[error(transparent)]
  Upstream(#[from] UpstreamError),
  /// A synchronous collection finished without a terminal signal.
  #[error("stream did not terminate synchronously")]
  NotTerminated,
}

impl StreamError {
  /// Wraps a domain error.
  #[must_use]
  pub fn upstream<E>(error: E) -> Self
  where
    E: Error + Send + Sync + 'static, {
    Self::Upstream(UpstreamError::new(error))
  }

  /// Creates a domain error carrying only a message.
  #[must_use]
  pub fn message(message: impl Into<alloc::string::String>) -> Self {
    Self::Upstream(UpstreamError::message(message))
  }

  /// Returns the error classification.
  #[must_use]
  pub const fn kind(&self) -> StreamErrorKind {
    match self {
      | Self::Protocol(ProtocolViolation::DemandExceeded) => StreamErrorKind::DemandExceeded,
      | Self::Protocol(ProtocolViolation::NonPositiveRequest) => StreamErrorKind::NonPositiveRequest,
      | Self::Protocol(ProtocolViolation::NullValue) => StreamErrorKind::NullValue,
      | Self::Protocol(ProtocolViolation::SignalAfterTerminal) => StreamErrorKind::SignalAfterTerminal,
      | Self::Upstream(_) => StreamErrorKind::Upstream,
      | Self::NotTerminated => StreamErrorKind::NotTerminated,
    }
  }

  /// Returns the wrapped domain error when it is of type `E`.
  #[must_use]
  pub fn downcast_ref<E>(&self) -> Option<&E>
  where
    E: Error + 'static, {
    match self {
      | Self::Upstream(error) => error.downcast_ref::<E>(),
      | _ => None,
    }
  }

  /// Returns `true` for protocol violations.
  #[must_use]
  pub const fn is_protocol_violation(&self) -> bool {
    matches!(self, Self::Protocol(_))
  }
}

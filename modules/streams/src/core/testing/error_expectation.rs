//! Error step matching.

use alloc::{
  boxed::Box,
  string::{String, ToString},
};
use core::{error::Error, fmt};

use crate::core::{StreamError, StreamErrorKind};

/// What an error step accepts.
pub(crate) enum ErrorExpectation {
  Any,
  Kind(StreamErrorKind),
  Message(String),
  TypeOf { type_name: &'static str, check: fn(&StreamError) -> bool },
  Matches(Box<dyn Fn(&StreamError) -> bool + Send>),
}

impl ErrorExpectation {
  pub(crate) fn of<E>() -> Self
  where
    E: Error + 'static, {
    Self::TypeOf { type_name: core::any::type_name::<E>(), check: |error| error.downcast_ref::<E>().is_some() }
  }

  pub(crate) fn matches(&self, error: &StreamError) -> bool {
    match self {
      | Self::Any => true,
      | Self::Kind(kind) => error.kind() == *kind,
      | Self::Message(message) => error.to_string() == *message,
      | Self::TypeOf { check, .. } => check(error),
      | Self::Matches(predicate) => predicate(error),
    }
  }
}

impl fmt::Display for ErrorExpectation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Any => f.write_str("onError(..)"),
      | Self::Kind(kind) => write!(f, "onError(kind {kind:?})"),
      | Self::Message(message) => write!(f, "onError({message})"),
      | Self::TypeOf { type_name, .. } => write!(f, "onError(<{type_name}>)"),
      | Self::Matches(_) => f.write_str("onError(matching predicate)"),
    }
  }
}


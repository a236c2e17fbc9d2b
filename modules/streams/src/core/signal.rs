//! Signals exchanged between a publisher and its subscriber.


use core::fmt;

use crate::core::stream_error::StreamError;

/// Atomic unit of stream communication.
///
/// A stream carries any number of [`Signal::Value`]s followed by at most one terminal signal,
/// either [`Signal::Complete`] or [`Signal::Error`].
#[derive(Debug, Clone)]
pub enum Signal<T> {
  /// A produced value.
  Value(T),
  /// Successful termination.
  Complete,
  /// Failed termination.
  Error(StreamError),
}

impl<T> Signal<T> {
  /// Returns `true` for [`Signal::Complete`] and [`Signal::Error`].
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::Complete | Self::Error(_))
  }

  /// Returns `true` for [`Signal::Value`].
  #[must_use]
  pub const fn is_value(&self) -> bool {
    matches!(self, Self::Value(_))
  }

  /// Returns the carried value, if any.
  #[must_use]
  pub const fn value(&self) -> Option<&T> {
    match self {
      | Self::Value(value) => Some(value),
      | _ => None,
    }
  }

  /// Returns the carried error, if any.
  #[must_use]
  pub const fn error(&self) -> Option<&StreamError> {
    match self {
      | Self::Error(error) => Some(error),
      | _ => None,
    }
  }

  /// Transforms the carried value, leaving terminal signals untouched.
  #[must_use]
  pub fn map<U, F>(self, func: F) -> Signal<U>
  where
    F: FnOnce(T) -> U, {
    match self {
      | Self::Value(value) => Signal::Value(func(value)),
      | Self::Complete => Signal::Complete,
      | Self::Error(error) => Signal::Error(error),
    }
  }
}

impl<T: fmt::Debug> fmt::Display for Signal<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Value(value) => write!(f, "onNext({value:?})"),
      | Self::Complete => f.write_str("onComplete()"),
      | Self::Error(error) => write!(f, "onError({error})"),
    }
  }
}

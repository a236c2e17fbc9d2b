//! Script steps.

use alloc::boxed::Box;
use core::time::Duration;

use super::error_expectation::ErrorExpectation;

/// One instruction of a verification script.
pub(crate) enum VerificationStep<T> {
  Subscription,
  Next(T),
  NextMatches(Box<dyn FnMut(&T) -> bool + Send>),
  NextCount(u64),
  Complete,
  Error(ErrorExpectation),
  Await(Duration),
  NoEvent(Duration),
  Then(Box<dyn FnOnce() + Send>),
  Request(u64),
  Cancel,
}

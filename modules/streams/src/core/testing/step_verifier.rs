//! Scripted verification of a publisher.

#[cfg(test)]
mod tests;

use alloc::{
  boxed::Box,
  format,
  string::{String, ToString},
  sync::Arc,
  vec::Vec,
};
use core::{error::Error, fmt::Debug, time::Duration};

use spin::Mutex;

use super::{
  StepVerifierOptions, VerificationError, VerificationReport,
  error_expectation::ErrorExpectation,
  recording_subscriber::{Recording, RecordingSubscriber},
  verification_step::VerificationStep,
};
use crate::core::{MonotonicClock, Publisher, Signal, StreamError, StreamErrorKind, Subscription, VirtualScheduler};

/// Subscribes to a publisher and checks its signals against an ordered script.
///
/// Signals are buffered between verification points; each expectation consumes the oldest one.
/// Time only moves through [`then_await`](Self::then_await) and
/// [`expect_no_event`](Self::expect_no_event), which advance the verifier's
/// [`VirtualScheduler`]. The first mismatch stops the run and cancels the subscription.
pub struct StepVerifier<T> {
  publisher:  Box<dyn Publisher<T>>,
  scheduler:  VirtualScheduler,
  options:    StepVerifierOptions,
  wall_clock: Option<Arc<dyn MonotonicClock>>,
  steps:      Vec<VerificationStep<T>>,
}

impl<T> StepVerifier<T>
where
  T: Debug + PartialEq + Send + 'static,
{
  /// Verifies `publisher` on a fresh scheduler.
  #[must_use]
  pub fn create<P>(publisher: P) -> Self
  where
    P: Publisher<T> + 'static, {
    Self::with_scheduler(VirtualScheduler::new(), publisher)
  }

  /// Builds the publisher against a fresh scheduler owned by the verifier.
  #[must_use]
  pub fn with_virtual_time<P, F>(factory: F) -> Self
  where
    P: Publisher<T> + 'static,
    F: FnOnce(&VirtualScheduler) -> P, {
    let scheduler = VirtualScheduler::new();
    let publisher = factory(&scheduler);
    Self::with_scheduler(scheduler, publisher)
  }

  /// Verifies `publisher`, advancing `scheduler` for time-based steps.
  #[must_use]
  pub fn with_scheduler<P>(scheduler: VirtualScheduler, publisher: P) -> Self
  where
    P: Publisher<T> + 'static, {
    Self {
      publisher: Box::new(publisher),
      scheduler,
      options: StepVerifierOptions::new(),
      wall_clock: None,
      steps: Vec::new(),
    }
  }

  /// Replaces the subscription options.
  #[must_use]
  pub fn with_options(mut self, options: StepVerifierOptions) -> Self {
    self.options = options;
    self
  }

  /// Requests `amount` on subscribe instead of unbounded demand.
  #[must_use]
  pub fn with_initial_demand(mut self, amount: u64) -> Self {
    self.options = self.options.with_initial_demand(amount);
    self
  }

  /// Measures the run with `clock` in addition to logical time.
  #[must_use]
  pub fn with_wall_clock(mut self, clock: Arc<dyn MonotonicClock>) -> Self {
    self.wall_clock = Some(clock);
    self
  }

  /// Returns the scheduler driving time-based steps.
  #[must_use]
  pub const fn scheduler(&self) -> &VirtualScheduler {
    &self.scheduler
  }

  fn step(mut self, step: VerificationStep<T>) -> Self {
    self.steps.push(step);
    self
  }

  /// Expects `on_subscribe` to have been called.
  #[must_use]
  pub fn expect_subscription(self) -> Self {
    self.step(VerificationStep::Subscription)
  }

  /// Expects the next signal to be `value`.
  #[must_use]
  pub fn expect_next(self, value: T) -> Self {
    self.step(VerificationStep::Next(value))
  }

  /// Expects the next signals to be `values`, in order.
  #[must_use]
  pub fn expect_next_all<I>(self, values: I) -> Self
  where
    I: IntoIterator<Item = T>, {
    values.into_iter().fold(self, Self::expect_next)
  }

  /// Expects the next signal to be a value accepted by `predicate`.
  #[must_use]
  pub fn expect_next_matches<P>(self, predicate: P) -> Self
  where
    P: FnMut(&T) -> bool + Send + 'static, {
    self.step(VerificationStep::NextMatches(Box::new(predicate)))
  }

  /// Expects `count` values, whatever their content.
  #[must_use]
  pub fn expect_next_count(self, count: u64) -> Self {
    self.step(VerificationStep::NextCount(count))
  }

  /// Expects completion.
  #[must_use]
  pub fn expect_complete(self) -> Self {
    self.step(VerificationStep::Complete)
  }

  /// Expects any error.
  #[must_use]
  pub fn expect_error(self) -> Self {
    self.step(VerificationStep::Error(ErrorExpectation::Any))
  }

  /// Expects an error of the given classification.
  #[must_use]
  pub fn expect_error_kind(self, kind: StreamErrorKind) -> Self {
    self.step(VerificationStep::Error(ErrorExpectation::Kind(kind)))
  }

  /// Expects an error wrapping a domain error of type `E`.
  #[must_use]
  pub fn expect_error_of<E>(self) -> Self
  where
    E: Error + 'static, {
    self.step(VerificationStep::Error(ErrorExpectation::of::<E>()))
  }

  /// Expects an error whose message is exactly `message`.
  #[must_use]
  pub fn expect_error_message(self, message: impl Into<String>) -> Self {
    self.step(VerificationStep::Error(ErrorExpectation::Message(message.into())))
  }

  /// Expects an error accepted by `predicate`.
  #[must_use]
  pub fn expect_error_matches<P>(self, predicate: P) -> Self
  where
    P: Fn(&StreamError) -> bool + Send + 'static, {
    self.step(VerificationStep::Error(ErrorExpectation::Matches(Box::new(predicate))))
  }

  /// Advances the scheduler by `duration`; signals produced meanwhile are buffered.
  #[must_use]
  pub fn then_await(self, duration: Duration) -> Self {
    self.step(VerificationStep::Await(duration))
  }

  /// Advances the scheduler by `duration` and fails if a signal arrives before the window ends.
  ///
  /// Signals due exactly at the end of the window are buffered for the following steps.
  #[must_use]
  pub fn expect_no_event(self, duration: Duration) -> Self {
    self.step(VerificationStep::NoEvent(duration))
  }

  /// Runs `action`, typically to drive a test publisher.
  #[must_use]
  pub fn then<F>(self, action: F) -> Self
  where
    F: FnOnce() + Send + 'static, {
    self.step(VerificationStep::Then(Box::new(action)))
  }

  /// Requests `amount` more values.
  #[must_use]
  pub fn then_request(self, amount: u64) -> Self {
    self.step(VerificationStep::Request(amount))
  }

  /// Cancels the subscription.
  #[must_use]
  pub fn then_cancel(self) -> Self {
    self.step(VerificationStep::Cancel)
  }

  /// Appends [`expect_complete`](Self::expect_complete) and runs the script.
  ///
  /// # Errors
  ///
  /// Returns the first mismatch.
  pub fn verify_complete(self) -> Result<VerificationReport, VerificationError> {
    self.expect_complete().verify()
  }

  /// Appends [`expect_error`](Self::expect_error) and runs the script.
  ///
  /// # Errors
  ///
  /// Returns the first mismatch.
  pub fn verify_error(self) -> Result<VerificationReport, VerificationError> {
    self.expect_error().verify()
  }

  /// Runs the script and returns the report for further assertions.
  ///
  /// # Errors
  ///
  /// Returns the first mismatch.
  pub fn verify_then_assert_that(self) -> Result<VerificationReport, VerificationError> {
    self.verify()
  }

  /// Subscribes and runs the script.
  ///
  /// A script that ends before a terminal signal was consumed cancels the subscription.
  ///
  /// # Errors
  ///
  /// Returns the first mismatch.
  pub fn verify(self) -> Result<VerificationReport, VerificationError> {
    let Self { publisher, scheduler, options, wall_clock, steps } = self;
    let virtual_start = scheduler.now();
    let wall_start = wall_clock.as_ref().map(|clock| clock.now());

    let recording = Recording::shared();
    let subscriber = RecordingSubscriber::new(recording.clone(), options.initial_demand());
    let subscription = publisher.subscribe(Box::new(subscriber));
    let mut run = Run { recording, scheduler: scheduler.clone(), subscription: subscription.clone(), finished: false };

    for (index, step) in steps.into_iter().enumerate() {
      if let Err(error) = run.execute(index, step) {
        tracing::debug!(%error, "verification failed");
        subscription.cancel();
        return Err(error);
      }
    }
    if !run.finished {
      subscription.cancel();
    }

    let virtual_elapsed = scheduler.now().saturating_sub(virtual_start);
    let wall_elapsed = wall_clock.zip(wall_start).map(|(clock, start)| clock.now().saturating_sub(start));
    Ok(VerificationReport::new(subscription.dropped_count(), virtual_elapsed, wall_elapsed))
  }
}

struct Run<T> {
  recording:    Arc<Mutex<Recording<T>>>,
  scheduler:    VirtualScheduler,
  subscription: Subscription,
  finished:     bool,
}

impl<T> Run<T>
where
  T: Debug + PartialEq,
{
  fn execute(&mut self, step: usize, instruction: VerificationStep<T>) -> Result<(), VerificationError> {
    match instruction {
      | VerificationStep::Subscription => {
        if self.recording.lock().subscribed {
          Ok(())
        } else {
          Err(VerificationError::MissingSubscription { step })
        }
      },
      | VerificationStep::Next(expected) => {
        let description = Signal::Value(&expected).to_string();
        self.expect(step, &description, |signal| matches!(signal, Signal::Value(value) if *value == expected))
      },
      | VerificationStep::NextMatches(mut predicate) => self.expect(step, "onNext(matching predicate)", |signal| {
        matches!(signal, Signal::Value(value) if predicate(value))
      }),
      | VerificationStep::NextCount(count) => {
        for received in 0..count {
          let description = format!("onNext(#{} of {count})", received + 1);
          self.expect(step, &description, Signal::is_value)?;
        }
        Ok(())
      },
      | VerificationStep::Complete => {
        self.expect(step, "onComplete()", |signal| matches!(signal, Signal::Complete))?;
        self.finished = true;
        Ok(())
      },
      | VerificationStep::Error(expectation) => {
        let description = expectation.to_string();
        self.expect(step, &description, |signal| matches!(signal, Signal::Error(error) if expectation.matches(error)))?;
        self.finished = true;
        Ok(())
      },
      | VerificationStep::Await(duration) => {
        self.scheduler.advance_by(duration);
        Ok(())
      },
      | VerificationStep::NoEvent(window) => self.expect_no_event(step, window),
      | VerificationStep::Then(action) => {
        action();
        Ok(())
      },
      | VerificationStep::Request(amount) => {
        self.subscription.request(amount);
        Ok(())
      },
      | VerificationStep::Cancel => {
        self.subscription.cancel();
        self.finished = true;
        Ok(())
      },
    }
  }

  fn expect<F>(&self, step: usize, expected: &str, accept: F) -> Result<(), VerificationError>
  where
    F: FnOnce(&Signal<T>) -> bool, {
    let next = self.recording.lock().signals.pop_front();
    match next {
      | None => Err(VerificationError::MissingSignal { step, expected: expected.to_string() }),
      | Some(signal) if accept(&signal) => Ok(()),
      | Some(signal) => {
        Err(VerificationError::UnexpectedSignal { step, expected: expected.to_string(), actual: signal.to_string() })
      },
    }
  }

  fn expect_no_event(&self, step: usize, window: Duration) -> Result<(), VerificationError> {
    let buffered = self.recording.lock().signals.len();
    let target = self.scheduler.now().saturating_add(window);
    self.scheduler.advance_before(target);
    let intruder = self.recording.lock().signals.get(buffered).map(ToString::to_string);
    if let Some(actual) = intruder {
      return Err(VerificationError::UnexpectedEvent { step, actual, window });
    }
    self.scheduler.advance_to(target);
    Ok(())
  }
}

use alloc::{boxed::Box, string::String, sync::Arc};
use core::time::Duration;

use super::StepVerifier;
use crate::core::{
  Flux, MessageError, Mono, MonotonicClock, Publisher, StreamError, StreamErrorKind, Subscriber, Subscription,
  VirtualScheduler,
  test_recorder::Recorder,
  testing::{TestPublisher, VerificationError},
};

#[test]
fn verifies_values_then_completion() {
  let report = StepVerifier::create(Flux::just(["a", "b", "c"]))
    .expect_subscription()
    .expect_next("a")
    .expect_next_all(["b", "c"])
    .verify_complete()
    .unwrap();
  assert_eq!(report.dropped_count(), 0);
  assert_eq!(report.virtual_elapsed(), Duration::ZERO);
}

#[test]
fn reports_the_first_mismatching_step() {
  let error = StepVerifier::create(Flux::range(1, 3)).expect_next(1).expect_next(5).verify_complete().unwrap_err();
  assert_eq!(error, VerificationError::UnexpectedSignal {
    step:     1,
    expected: String::from("onNext(5)"),
    actual:   String::from("onNext(2)"),
  });
}

#[test]
fn missing_signal_when_the_stream_stalls() {
  let error = StepVerifier::create(Flux::<u8>::never()).expect_next(1).verify().unwrap_err();
  assert_eq!(error, VerificationError::MissingSignal { step: 0, expected: String::from("onNext(1)") });
}

#[test]
fn completion_instead_of_a_value_is_unexpected() {
  let error = StepVerifier::create(Flux::<u8>::empty()).expect_next(1).verify().unwrap_err();
  assert!(matches!(error, VerificationError::UnexpectedSignal { step: 0, ref actual, .. } if actual == "onComplete()"));
}

#[test]
fn matches_and_counts_values() {
  StepVerifier::create(Flux::range(0, 10))
    .expect_next_matches(|value| *value == 0)
    .expect_next_count(8)
    .expect_next(9)
    .verify_complete()
    .unwrap();
}

#[test]
fn count_failure_names_the_missing_value() {
  let error = StepVerifier::create(Flux::range(0, 2)).expect_next_count(3).verify().unwrap_err();
  assert!(matches!(error, VerificationError::UnexpectedSignal { step: 0, ref expected, .. } if expected == "onNext(#3 of 3)"));
}

#[test]
fn error_expectations() {
  let failing = || Flux::<u8>::error(StreamError::message("boom"));
  StepVerifier::create(failing()).verify_error().unwrap();
  StepVerifier::create(failing()).expect_error_kind(StreamErrorKind::Upstream).verify().unwrap();
  StepVerifier::create(failing()).expect_error_of::<MessageError>().verify().unwrap();
  StepVerifier::create(failing()).expect_error_message("boom").verify().unwrap();
  StepVerifier::create(failing()).expect_error_matches(|error| !error.is_protocol_violation()).verify().unwrap();

  let error = StepVerifier::create(failing()).expect_error_kind(StreamErrorKind::NullValue).verify().unwrap_err();
  assert!(matches!(error, VerificationError::UnexpectedSignal { step: 0, .. }));
  let error = StepVerifier::create(Flux::<u8>::empty()).verify_error().unwrap_err();
  assert!(matches!(error, VerificationError::UnexpectedSignal { ref expected, .. } if expected == "onError(..)"));
}

#[test]
fn bounded_initial_demand_and_later_requests() {
  StepVerifier::create(Flux::range(0, 5))
    .with_initial_demand(2)
    .expect_next_all([0, 1])
    .expect_no_event(Duration::ZERO)
    .then_request(3)
    .expect_next_all([2, 3, 4])
    .verify_complete()
    .unwrap();
}

#[test]
fn zero_initial_demand_requests_nothing() {
  StepVerifier::create(Flux::range(0, 1))
    .with_initial_demand(0)
    .expect_subscription()
    .expect_no_event(Duration::from_secs(1))
    .then_request(1)
    .expect_next(0)
    .verify_complete()
    .unwrap();
}

#[test]
fn interval_on_virtual_time() {
  let report = StepVerifier::with_virtual_time(|scheduler| Flux::interval(Duration::from_secs(1), scheduler).take(2))
    .expect_subscription()
    .expect_no_event(Duration::from_secs(1))
    .expect_next(0)
    .then_await(Duration::from_secs(1))
    .expect_next(1)
    .verify_complete()
    .unwrap();
  assert_eq!(report.virtual_elapsed(), Duration::from_secs(2));
}

#[test]
fn no_event_window_rejects_early_signals() {
  let error = StepVerifier::with_virtual_time(|scheduler| Flux::interval(Duration::from_millis(500), scheduler))
    .expect_no_event(Duration::from_secs(1))
    .verify()
    .unwrap_err();
  assert_eq!(error, VerificationError::UnexpectedEvent {
    step:   0,
    actual: String::from("onNext(0)"),
    window: Duration::from_secs(1),
  });
}

#[test]
fn buffered_signals_do_not_break_the_no_event_window() {
  StepVerifier::create(Flux::just([1]))
    .expect_no_event(Duration::from_secs(1))
    .expect_next(1)
    .verify_complete()
    .unwrap();
}

#[test]
fn delayed_mono_is_verified_without_waiting() {
  let scheduler = VirtualScheduler::new();
  let mono = Mono::just(7).delay_element(Duration::from_secs(3600), &scheduler);
  let report = StepVerifier::with_scheduler(scheduler.clone(), mono)
    .then_await(Duration::from_secs(3600))
    .expect_next(7)
    .verify_complete()
    .unwrap();
  assert_eq!(report.virtual_elapsed(), Duration::from_secs(3600));
  assert!(scheduler.is_idle());
}

#[test]
fn then_drives_a_test_publisher() {
  let publisher = TestPublisher::<u32>::create();
  let driver = publisher.clone();
  StepVerifier::create(publisher.flux())
    .expect_subscription()
    .then(move || {
      driver.next(1).next(2).complete();
    })
    .expect_next_all([1, 2])
    .verify_complete()
    .unwrap();
  assert!(publisher.was_requested());
}

#[test]
fn script_without_terminal_step_cancels() {
  let publisher = TestPublisher::<u32>::create();
  StepVerifier::create(publisher.flux()).expect_subscription().verify().unwrap();
  assert!(publisher.was_cancelled());
  assert_eq!(publisher.subscriber_count(), 0);
}

#[test]
fn then_cancel_stops_the_source() {
  let scheduler = VirtualScheduler::new();
  StepVerifier::with_scheduler(scheduler.clone(), Flux::interval(Duration::from_secs(1), &scheduler))
    .then_await(Duration::from_secs(2))
    .expect_next_all([0, 1])
    .then_cancel()
    .verify()
    .unwrap();
  assert!(scheduler.is_idle());
}

#[test]
fn failure_cancels_the_subscription() {
  let publisher = TestPublisher::<u32>::create();
  let error = StepVerifier::create(publisher.flux()).expect_next(1).verify().unwrap_err();
  assert!(matches!(error, VerificationError::MissingSignal { step: 0, .. }));
  assert!(publisher.was_cancelled());
}

#[test]
fn missing_subscription_is_reported() {
  struct Silent;

  impl Publisher<u8> for Silent {
    fn subscribe(&self, _subscriber: Box<dyn Subscriber<u8>>) -> Subscription {
      let (_recorder, stand_in) = Recorder::<u8>::new(0);
      Flux::never().subscribe(stand_in)
    }
  }

  let error = StepVerifier::create(Silent).expect_subscription().verify().unwrap_err();
  assert_eq!(error, VerificationError::MissingSubscription { step: 0 });
}

#[test]
fn wall_clock_is_reported_when_supplied() {
  let wall = VirtualScheduler::new();
  let clock: Arc<dyn MonotonicClock> = Arc::new(wall.clone());
  let report = StepVerifier::create(Flux::just([1u8]))
    .with_wall_clock(clock)
    .then(move || wall.advance_by(Duration::from_millis(3)))
    .expect_next(1)
    .verify_complete()
    .unwrap();
  assert_eq!(report.wall_elapsed(), Some(Duration::from_millis(3)));
  assert!(report.took_less_than(Duration::from_millis(4)).is_ok());
}

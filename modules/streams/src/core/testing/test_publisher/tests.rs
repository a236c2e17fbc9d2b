use alloc::{
  string::{String, ToString},
  vec,
};

use super::TestPublisher;
use crate::core::{
  Publisher, StreamError, StreamErrorKind,
  test_recorder::Recorder,
  testing::{StepVerifier, TestPublisherConfig},
};

#[test]
fn broadcasts_to_every_subscription() {
  let publisher = TestPublisher::<u8>::create();
  let (first, first_subscriber) = Recorder::new(u64::MAX);
  let (second, second_subscriber) = Recorder::new(u64::MAX);
  publisher.subscribe(first_subscriber);
  publisher.subscribe(second_subscriber);
  assert_eq!(publisher.subscriber_count(), 2);

  publisher.next_all([1, 2]).complete();
  assert_eq!(first.values(), vec![1, 2]);
  assert_eq!(second.values(), vec![1, 2]);
  assert_eq!(second.completed(), 1);
  assert_eq!(publisher.subscriber_count(), 0);
}

#[test]
fn tracks_subscription_activity() {
  let publisher = TestPublisher::<u8>::create();
  assert!(!publisher.was_subscribed());
  let (recorder, subscriber) = Recorder::new(0);
  let subscription = publisher.subscribe(subscriber);
  assert!(publisher.was_subscribed());
  assert!(!publisher.was_requested());

  subscription.request(1);
  assert!(publisher.was_requested());
  subscription.cancel();
  assert!(publisher.was_cancelled());
  publisher.next(9);
  assert!(recorder.values().is_empty());
}

#[test]
fn emitting_without_demand_fails_by_default() {
  let publisher = TestPublisher::<u8>::create();
  let (recorder, subscriber) = Recorder::new(1);
  publisher.subscribe(subscriber);
  publisher.next(1).next(2);
  assert_eq!(recorder.values(), vec![1]);
  assert_eq!(recorder.errors()[0].kind(), StreamErrorKind::DemandExceeded);
}

#[test]
fn lenient_publisher_counts_overflow() {
  let publisher = TestPublisher::<u8>::create_noncompliant(TestPublisherConfig::default().with_strict_on_overflow_demand(false));
  let (recorder, subscriber) = Recorder::new(1);
  let subscription = publisher.subscribe(subscriber);
  publisher.next_all([1, 2, 3]).complete();
  assert_eq!(recorder.values(), vec![1]);
  assert_eq!(recorder.completed(), 1);
  assert_eq!(subscription.dropped_count(), 2);
}

#[test]
fn null_fails_every_subscription_when_disallowed() {
  let publisher = TestPublisher::<u8>::create();
  let (recorder, subscriber) = Recorder::new(u64::MAX);
  publisher.subscribe(subscriber);
  publisher.next(1).next_nullable(None).next(2);
  assert_eq!(recorder.values(), vec![1]);
  assert_eq!(recorder.errors()[0].kind(), StreamErrorKind::NullValue);
}

#[test]
fn allowed_null_is_reported_on_completion() {
  let publisher = TestPublisher::<String>::create_noncompliant(TestPublisherConfig::default().with_allow_null(true));
  let driver = publisher.clone();
  StepVerifier::create(publisher.flux())
    .then(move || {
      driver.emit_nullable([Some(String::from("1")), Some(String::from("2")), None, Some(String::from("3"))]);
    })
    .expect_next_all([String::from("1"), String::from("2"), String::from("3")])
    .expect_error_kind(StreamErrorKind::NullValue)
    .verify()
    .unwrap();
}

#[test]
fn late_subscribers_see_the_terminal_signal() {
  let publisher = TestPublisher::<u8>::create();
  publisher.error(StreamError::message("gone"));
  let (recorder, subscriber) = Recorder::new(u64::MAX);
  publisher.subscribe(subscriber);
  assert_eq!(recorder.subscribed(), 1);
  assert_eq!(recorder.errors()[0].to_string(), "gone");
}

#[test]
fn values_after_completion_are_dropped() {
  let publisher = TestPublisher::<u8>::create();
  let driver = publisher.clone();
  StepVerifier::create(publisher.flux())
    .then(move || {
      driver.emit([1, 2, 3]).next(4);
    })
    .expect_next_all([1, 2, 3])
    .expect_complete()
    .verify_then_assert_that()
    .unwrap()
    .has_dropped(1)
    .unwrap();
}

#[test]
fn mono_takes_the_first_value() {
  let publisher = TestPublisher::<u8>::create();
  let driver = publisher.clone();
  StepVerifier::create(publisher.mono())
    .then(move || {
      driver.next(5).next(6);
    })
    .expect_next(5)
    .verify_complete()
    .unwrap();
  assert!(publisher.was_cancelled());
}

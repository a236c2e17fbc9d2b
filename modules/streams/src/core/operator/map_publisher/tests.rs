use alloc::{string::String, vec, vec::Vec};

use crate::core::{Flux, MessageError, StreamError, test_recorder::Recorder};

#[test]
fn maps_every_value_in_order() {
  let (recorder, subscriber) = Recorder::new(u64::MAX);
  Flux::just(vec![1, 2, 3]).map(|value| value * 10).subscribe(subscriber);
  assert_eq!(recorder.values(), vec![10, 20, 30]);
  assert_eq!(recorder.completed(), 1);
}

#[test]
fn failure_cancels_upstream_and_terminates_with_the_error() {
  let (recorder, subscriber) = Recorder::new(u64::MAX);
  let subscription = Flux::just(vec![1, 2, 3, 4])
    .try_map(|value| if value == 3 { Err(StreamError::message("three")) } else { Ok(value) })
    .subscribe(subscriber);

  assert_eq!(recorder.values(), vec![1, 2]);
  assert_eq!(recorder.completed(), 0);
  let errors = recorder.errors();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].downcast_ref::<MessageError>().map(MessageError::message), Some("three"));
  assert!(subscription.is_cancelled());
}

#[test]
fn map_then_inverse_round_trips() {
  let words: Vec<String> = vec!["a".into(), "bc".into()];
  let (recorder, subscriber) = Recorder::new(u64::MAX);
  Flux::just(words.clone()).map(|word| word.into_bytes()).map(|bytes| String::from_utf8(bytes).unwrap_or_default()).subscribe(subscriber);
  assert_eq!(recorder.values(), words);
}

#[test]
fn upstream_error_passes_through() {
  let (recorder, subscriber) = Recorder::<u8>::new(1);
  Flux::<u8>::error(StreamError::message("boom")).map(|value| value + 1).subscribe(subscriber);
  assert_eq!(recorder.errors().len(), 1);
}

use alloc::vec;
use core::time::Duration;

use super::IntervalSource;
use crate::core::{Publisher, StreamErrorKind, VirtualScheduler, test_recorder::Recorder};

#[test]
fn ticks_at_each_period_starting_after_one_period() {
  let scheduler = VirtualScheduler::new();
  let source = IntervalSource::new(Duration::from_secs(1), scheduler.clone());
  let (recorder, subscriber) = Recorder::new(u64::MAX);
  source.subscribe(subscriber);

  scheduler.advance_by(Duration::from_millis(999));
  assert!(recorder.values().is_empty());
  scheduler.advance_by(Duration::from_millis(1));
  assert_eq!(recorder.values(), vec![0]);
  scheduler.advance_by(Duration::from_secs(2));
  assert_eq!(recorder.values(), vec![0, 1, 2]);
  assert_eq!(recorder.completed(), 0);
}

#[test]
fn cancel_removes_the_pending_tick() {
  let scheduler = VirtualScheduler::new();
  let source = IntervalSource::new(Duration::from_secs(1), scheduler.clone());
  let (recorder, subscriber) = Recorder::new(u64::MAX);
  let subscription = source.subscribe(subscriber);
  assert_eq!(scheduler.pending_count(), 1);

  subscription.cancel();
  assert!(scheduler.is_idle());
  scheduler.advance_by(Duration::from_secs(5));
  assert!(recorder.values().is_empty());
}

#[test]
fn tick_without_demand_is_a_protocol_violation() {
  let scheduler = VirtualScheduler::new();
  let source = IntervalSource::new(Duration::from_secs(1), scheduler.clone());
  let (recorder, subscriber) = Recorder::new(1);
  source.subscribe(subscriber);

  scheduler.advance_by(Duration::from_secs(2));
  assert_eq!(recorder.values(), vec![0]);
  let errors = recorder.errors();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].kind(), StreamErrorKind::DemandExceeded);
  scheduler.advance_by(Duration::from_secs(2));
  assert!(scheduler.is_idle());
}

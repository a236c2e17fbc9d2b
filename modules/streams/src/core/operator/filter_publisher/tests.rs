use alloc::vec;

use crate::core::{Demand, Flux, test_recorder::Recorder};

#[test]
fn forwards_only_accepted_values() {
  let (recorder, subscriber) = Recorder::new(u64::MAX);
  Flux::range(1, 10).filter(|value| value % 3 == 0).subscribe(subscriber);
  assert_eq!(recorder.values(), vec![3, 6, 9]);
  assert_eq!(recorder.completed(), 1);
}

#[test]
fn rejected_values_are_replenished_under_bounded_demand() {
  let (recorder, subscriber) = Recorder::new(2);
  let subscription = Flux::range(1, 10).filter(|value| value % 4 == 0).subscribe(subscriber);
  assert_eq!(recorder.values(), vec![4, 8]);
  assert_eq!(recorder.completed(), 0);
  assert_eq!(subscription.demand(), Demand::Finite(0));
  assert_eq!(subscription.dropped_count(), 0);

  subscription.request(1);
  assert_eq!(recorder.completed(), 1);
}

#[test]
fn push_source_is_replenished_before_it_runs_out_of_demand() {
  let (recorder, subscriber) = Recorder::new(2);
  let subscription = Flux::create(|emitter| {
    for value in 0_u64..=3 {
      emitter.next(value);
    }
    emitter.complete();
  })
  .filter(|value| value % 3 == 0)
  .subscribe(subscriber);

  assert_eq!(recorder.values(), vec![0, 3]);
  assert_eq!(recorder.completed(), 1);
  assert!(recorder.errors().is_empty());
  assert_eq!(subscription.dropped_count(), 0);
}

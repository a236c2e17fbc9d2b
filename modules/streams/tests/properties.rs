use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use rivulet_streams_rs::core::{
  EmitterConfig, Flux, Mono, StreamErrorKind, VirtualScheduler,
  testing::{DemandFuzzRunner, StepVerifier},
};

#[test]
fn concat_is_associative() {
  let a = || Flux::range(0, 3);
  let b = || Flux::range(10, 2);
  let c = || Flux::range(20, 4);

  let left = a().concat_with(b()).concat_with(c()).collect_values().unwrap();
  let right = a().concat_with(b().concat_with(c())).collect_values().unwrap();
  let flat = Flux::concat([a(), b(), c()]).collect_values().unwrap();
  assert_eq!(left, right);
  assert_eq!(left, flat);
}

#[test]
fn inverse_maps_preserve_the_sequence() {
  let source = Flux::range(0, 100);
  let round_trip = source.clone().map(|value| value * 3 + 1).map(|value| (value - 1) / 3);
  assert_eq!(round_trip.collect_values().unwrap(), source.collect_values().unwrap());
}

#[test]
fn interval_values_arrive_one_period_apart() {
  let scheduler = VirtualScheduler::new();
  let arrivals = Arc::new(Mutex::new(Vec::new()));
  let sink = arrivals.clone();
  let clock = scheduler.clone();
  let period = Duration::from_millis(250);
  let _subscription = Flux::interval(period, &scheduler).take(5).subscribe_with(
    move |value| sink.lock().unwrap().push((value, clock.now())),
    |_| {},
    || {},
  );

  scheduler.advance_by(Duration::from_secs(10));
  let arrivals = arrivals.lock().unwrap();
  assert_eq!(arrivals.len(), 5);
  for (index, (value, at)) in arrivals.iter().enumerate() {
    assert_eq!(*value, index as u64);
    assert_eq!(*at, period * (index as u32 + 1));
  }
  assert!(scheduler.is_idle());
}

#[test]
fn emitting_beyond_demand_fails_when_strict() {
  let flux = Flux::create(|emitter| {
    for value in 0..3 {
      emitter.next(value);
    }
    emitter.complete();
  });

  StepVerifier::create(flux)
    .with_initial_demand(1)
    .expect_next(0)
    .expect_error_kind(StreamErrorKind::DemandExceeded)
    .verify()
    .unwrap();
}

#[test]
fn observed_plus_dropped_equals_attempted() {
  for (demand, attempted) in [(0_u64, 4_u64), (2, 5), (5, 5), (7, 3)] {
    let flux = Flux::create_with_config(EmitterConfig::default().with_strict_on_overflow_demand(false), move |emitter| {
      for value in 0..attempted {
        emitter.next(value);
      }
      emitter.complete();
    });
    let observed = demand.min(attempted);
    let report = StepVerifier::create(flux)
      .with_initial_demand(demand)
      .expect_next_count(observed)
      .expect_complete()
      .verify()
      .unwrap();
    assert_eq!(observed + report.dropped_count(), attempted);
  }
}

#[test]
fn fuzzed_demand_keeps_the_books_balanced() {
  for seed in 0..32 {
    let report = DemandFuzzRunner::new(seed).run(300);
    assert!(report.is_balanced(), "seed {seed}: {report:?}");
  }
}

#[test]
fn filter_keeps_requesting_past_rejected_values() {
  StepVerifier::create(Flux::range(0, 10).filter(|value| value % 3 == 0))
    .with_initial_demand(2)
    .expect_next_all([0, 3])
    .expect_no_event(Duration::from_millis(1))
    .then_request(2)
    .expect_next_all([6, 9])
    .verify_complete()
    .unwrap();
}

#[test]
fn take_cancels_an_endless_source() {
  let scheduler = VirtualScheduler::new();
  StepVerifier::with_scheduler(scheduler.clone(), Flux::interval(Duration::from_secs(1), &scheduler).take(3))
    .then_await(Duration::from_secs(3))
    .expect_next_all([0, 1, 2])
    .verify_complete()
    .unwrap();
  assert!(scheduler.is_idle());
}

#[test]
fn delay_elements_spaces_values() {
  StepVerifier::with_virtual_time(|scheduler| Flux::range(1, 3).delay_elements(Duration::from_secs(1), scheduler))
    .expect_no_event(Duration::from_secs(1))
    .expect_next(1)
    .expect_no_event(Duration::from_secs(1))
    .expect_next(2)
    .expect_no_event(Duration::from_secs(1))
    .expect_next(3)
    .verify_complete()
    .unwrap();
}

#[test]
fn delay_sequence_shifts_the_terminal_signal_too() {
  StepVerifier::with_virtual_time(|scheduler| {
    Flux::just(["x", "y"]).delay_sequence(Duration::from_millis(500), scheduler)
  })
  .expect_no_event(Duration::from_millis(500))
  .expect_next_all(["x", "y"])
  .verify_complete()
  .unwrap();
}

#[test]
fn delayed_mono_emits_zero() {
  let report = StepVerifier::with_virtual_time(|scheduler| Mono::delay(Duration::from_secs(86_400), scheduler))
    .expect_subscription()
    .expect_no_event(Duration::from_secs(86_400))
    .expect_next(0)
    .verify_complete()
    .unwrap();
  assert_eq!(report.virtual_elapsed(), Duration::from_secs(86_400));
}

#[test]
fn take_bounds_an_endless_synchronous_source() {
  StepVerifier::create(Flux::from_iterable(0_u64..).take(3)).expect_next_all([0, 1, 2]).verify_complete().unwrap();
}

#[test]
fn filter_over_a_push_source_honours_bounded_demand() {
  let source = Flux::create(|emitter| {
    for value in 0_u64..=3 {
      emitter.next(value);
    }
    emitter.complete();
  });
  StepVerifier::create(source.filter(|value| value % 3 == 0))
    .with_initial_demand(2)
    .expect_next_all([0, 3])
    .verify_complete()
    .unwrap();
}

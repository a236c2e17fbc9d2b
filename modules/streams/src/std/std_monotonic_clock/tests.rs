extern crate std;

use alloc::sync::Arc;
use core::time::Duration;

use super::StdMonotonicClock;
use crate::core::{Flux, MonotonicClock, testing::StepVerifier};

#[test]
fn never_goes_backwards() {
  let clock = StdMonotonicClock::new();
  let first = clock.now();
  std::thread::sleep(Duration::from_millis(2));
  assert!(clock.now() >= first + Duration::from_millis(2));
}

#[test]
fn measures_a_verification() {
  let clock: Arc<dyn MonotonicClock> = Arc::new(StdMonotonicClock::default());
  let report = StepVerifier::create(Flux::range(0, 3))
    .with_wall_clock(clock)
    .expect_next_all([0, 1, 2])
    .verify_complete()
    .unwrap();
  assert!(report.wall_elapsed().is_some());
  assert!(report.took_less_than(Duration::from_secs(5)).is_ok());
}

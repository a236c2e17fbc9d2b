use alloc::{boxed::Box, sync::Arc, vec, vec::Vec};
use core::time::Duration;

use spin::Mutex;

use super::VirtualScheduler;

fn recorder() -> (Arc<Mutex<Vec<(u32, Duration)>>>, impl Fn(u32, &VirtualScheduler) -> Box<dyn FnOnce() + Send>) {
  let log = Arc::new(Mutex::new(Vec::new()));
  let sink = log.clone();
  let make = move |tag: u32, scheduler: &VirtualScheduler| -> Box<dyn FnOnce() + Send> {
    let sink = sink.clone();
    let scheduler = scheduler.clone();
    Box::new(move || sink.lock().push((tag, scheduler.now())))
  };
  (log, make)
}

#[test]
fn fires_by_time_then_insertion_order() {
  let scheduler = VirtualScheduler::new();
  let (log, make) = recorder();
  scheduler.schedule_after(Duration::from_secs(2), make(1, &scheduler));
  scheduler.schedule_after(Duration::from_secs(1), make(2, &scheduler));
  scheduler.schedule_after(Duration::from_secs(1), make(3, &scheduler));
  assert_eq!(scheduler.pending_count(), 3);

  scheduler.advance_by(Duration::from_secs(5));
  assert_eq!(*log.lock(), vec![
    (2, Duration::from_secs(1)),
    (3, Duration::from_secs(1)),
    (1, Duration::from_secs(2))
  ]);
  assert_eq!(scheduler.now(), Duration::from_secs(5));
  assert!(scheduler.is_idle());
}

#[test]
fn actions_queued_while_firing_run_within_the_same_advance() {
  let scheduler = VirtualScheduler::new();
  let log = Arc::new(Mutex::new(Vec::new()));
  let inner_log = log.clone();
  let inner = scheduler.clone();
  scheduler.schedule_after(Duration::from_secs(1), move || {
    inner_log.lock().push(inner.now());
    let nested_log = inner_log.clone();
    let nested = inner.clone();
    inner.schedule_after(Duration::from_secs(1), move || nested_log.lock().push(nested.now()));
    let late_log = inner_log.clone();
    let late = inner.clone();
    inner.schedule_after(Duration::from_secs(10), move || late_log.lock().push(late.now()));
  });

  scheduler.advance_by(Duration::from_secs(3));
  assert_eq!(*log.lock(), vec![Duration::from_secs(1), Duration::from_secs(2)]);
  assert_eq!(scheduler.pending_count(), 1);
}

#[test]
fn cancelled_actions_never_run() {
  let scheduler = VirtualScheduler::new();
  let (log, make) = recorder();
  let handle = scheduler.schedule_after(Duration::from_millis(10), make(1, &scheduler));
  assert!(scheduler.cancel(handle));
  assert!(!scheduler.cancel(handle));
  assert!(scheduler.is_idle());

  scheduler.advance_by(Duration::from_secs(1));
  assert!(log.lock().is_empty());
}

#[test]
fn clock_never_moves_backwards() {
  let scheduler = VirtualScheduler::new();
  scheduler.advance_to(Duration::from_secs(4));
  scheduler.advance_to(Duration::from_secs(1));
  assert_eq!(scheduler.now(), Duration::from_secs(4));

  let (log, make) = recorder();
  scheduler.schedule_at(Duration::from_secs(2), make(1, &scheduler));
  scheduler.advance_by(Duration::ZERO);
  assert_eq!(*log.lock(), vec![(1, Duration::from_secs(4))]);
}

#[test]
fn advance_before_excludes_the_boundary() {
  let scheduler = VirtualScheduler::new();
  let (log, make) = recorder();
  scheduler.schedule_after(Duration::from_millis(500), make(1, &scheduler));
  scheduler.schedule_after(Duration::from_secs(1), make(2, &scheduler));

  scheduler.advance_before(Duration::from_secs(1));
  assert_eq!(*log.lock(), vec![(1, Duration::from_millis(500))]);
  assert_eq!(scheduler.now(), Duration::from_millis(500));

  scheduler.advance_to(Duration::from_secs(1));
  assert_eq!(log.lock().len(), 2);
  assert_eq!(scheduler.now(), Duration::from_secs(1));
}

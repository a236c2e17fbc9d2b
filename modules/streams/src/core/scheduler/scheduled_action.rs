use alloc::boxed::Box;
use core::{cmp::Ordering, time::Duration};

use super::TimerHandleId;

/// Deferred callback run by the scheduler.
pub(crate) type Action = Box<dyn FnOnce() + Send>;

/// Queue entry ordered by fire time, then by insertion order.
pub(crate) struct ScheduledAction {
  handle:   TimerHandleId,
  fire_at:  Duration,
  sequence: u64,
  action:   Action,
}

impl ScheduledAction {
  pub(crate) const fn new(handle: TimerHandleId, fire_at: Duration, sequence: u64, action: Action) -> Self {
    Self { handle, fire_at, sequence, action }
  }

  pub(crate) const fn handle(&self) -> TimerHandleId {
    self.handle
  }

  pub(crate) const fn fire_at(&self) -> Duration {
    self.fire_at
  }

  pub(crate) fn run(self) {
    (self.action)();
  }
}

impl PartialEq for ScheduledAction {
  fn eq(&self, other: &Self) -> bool {
    self.fire_at == other.fire_at && self.sequence == other.sequence
  }
}

impl Eq for ScheduledAction {}

impl PartialOrd for ScheduledAction {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for ScheduledAction {
  fn cmp(&self, other: &Self) -> Ordering {
    self.fire_at.cmp(&other.fire_at).then_with(|| self.sequence.cmp(&other.sequence))
  }
}

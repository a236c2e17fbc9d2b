//! Manually advanced scheduler driving time-based publishers.

#[cfg(test)]
mod tests;

use alloc::{
  boxed::Box,
  collections::{BTreeSet, BinaryHeap},
  sync::Arc,
};
use core::{cmp::Reverse, fmt, time::Duration};

use spin::Mutex;

use super::{
  MonotonicClock, TimerHandleId,
  scheduled_action::{Action, ScheduledAction},
};

struct SchedulerState {
  now:         Duration,
  queue:       BinaryHeap<Reverse<ScheduledAction>>,
  pending:     BTreeSet<TimerHandleId>,
  next_handle: u64,
  sequence:    u64,
}

impl SchedulerState {
  fn enqueue(&mut self, fire_at: Duration, action: Action) -> TimerHandleId {
    let handle = TimerHandleId::new(self.next_handle);
    self.next_handle = self.next_handle.wrapping_add(1);
    let entry = ScheduledAction::new(handle, fire_at, self.sequence, action);
    self.sequence = self.sequence.wrapping_add(1);
    self.queue.push(Reverse(entry));
    self.pending.insert(handle);
    handle
  }

  /// Pops the earliest live entry due at `target` (inclusive) or before it (exclusive).
  fn pop_due(&mut self, target: Duration, inclusive: bool) -> Option<ScheduledAction> {
    while let Some(Reverse(head)) = self.queue.peek() {
      let fire_at = head.fire_at();
      if fire_at > target || (!inclusive && fire_at == target) {
        return None;
      }
      let Reverse(entry) = self.queue.pop()?;
      if self.pending.remove(&entry.handle()) {
        return Some(entry);
      }
    }
    None
  }
}

/// Logical clock with a queue of actions ordered by fire time, then insertion order.
///
/// Time only moves when [`advance_by`](Self::advance_by) or [`advance_to`](Self::advance_to) is
/// called, and never backwards. Clones share the same clock and queue.
#[derive(Clone)]
pub struct VirtualScheduler {
  state: Arc<Mutex<SchedulerState>>,
}

impl VirtualScheduler {
  /// Creates a scheduler at time zero with an empty queue.
  #[must_use]
  pub fn new() -> Self {
    Self {
      state: Arc::new(Mutex::new(SchedulerState {
        now:         Duration::ZERO,
        queue:       BinaryHeap::new(),
        pending:     BTreeSet::new(),
        next_handle: 0,
        sequence:    0,
      })),
    }
  }

  /// Returns the current logical time.
  #[must_use]
  pub fn now(&self) -> Duration {
    self.state.lock().now
  }

  /// Queues `action` to run `delay` after the current logical time.
  pub fn schedule_after<F>(&self, delay: Duration, action: F) -> TimerHandleId
  where
    F: FnOnce() + Send + 'static, {
    let mut state = self.state.lock();
    let fire_at = state.now.saturating_add(delay);
    let handle = state.enqueue(fire_at, Box::new(action));
    tracing::trace!(%handle, at_nanos = nanos(fire_at), "timer scheduled");
    handle
  }

  /// Queues `action` to run at logical time `at`. Times in the past fire on the next advance.
  pub fn schedule_at<F>(&self, at: Duration, action: F) -> TimerHandleId
  where
    F: FnOnce() + Send + 'static, {
    let mut state = self.state.lock();
    let fire_at = at.max(state.now);
    let handle = state.enqueue(fire_at, Box::new(action));
    tracing::trace!(%handle, at_nanos = nanos(fire_at), "timer scheduled");
    handle
  }

  /// Removes a queued action. Returns `false` if it already ran or was cancelled.
  pub fn cancel(&self, handle: TimerHandleId) -> bool {
    let removed = self.state.lock().pending.remove(&handle);
    if removed {
      tracing::trace!(%handle, "timer cancelled");
    }
    removed
  }

  /// Advances the clock by `delta`, running every action due up to the new time.
  pub fn advance_by(&self, delta: Duration) {
    let target = self.now().saturating_add(delta);
    self.advance_to(target);
  }

  /// Advances the clock to `target`, running every action due up to and including it.
  ///
  /// Actions queued by running actions are honoured when they fall within the target. Targets
  /// in the past leave the clock untouched.
  pub fn advance_to(&self, target: Duration) {
    if target < self.now() {
      tracing::trace!(target_nanos = nanos(target), "ignoring advance into the past");
      return;
    }
    self.fire_due(target, true);
    let mut state = self.state.lock();
    state.now = state.now.max(target);
  }

  /// Runs every action due strictly before `target`, leaving the clock at the last fire time.
  pub(crate) fn advance_before(&self, target: Duration) {
    self.fire_due(target, false);
  }

  /// Returns the number of queued, non-cancelled actions.
  #[must_use]
  pub fn pending_count(&self) -> usize {
    self.state.lock().pending.len()
  }

  /// Returns `true` when nothing is queued.
  #[must_use]
  pub fn is_idle(&self) -> bool {
    self.pending_count() == 0
  }

  fn fire_due(&self, target: Duration, inclusive: bool) {
    loop {
      let entry = {
        let mut state = self.state.lock();
        let Some(entry) = state.pop_due(target, inclusive) else {
          return;
        };
        state.now = state.now.max(entry.fire_at());
        entry
      };
      tracing::trace!(handle = %entry.handle(), at_nanos = nanos(entry.fire_at()), "timer fired");
      entry.run();
    }
  }
}

impl Default for VirtualScheduler {
  fn default() -> Self {
    Self::new()
  }
}

impl MonotonicClock for VirtualScheduler {
  fn now(&self) -> Duration {
    VirtualScheduler::now(self)
  }
}

impl fmt::Debug for VirtualScheduler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.lock();
    f.debug_struct("VirtualScheduler").field("now", &state.now).field("pending", &state.pending.len()).finish()
  }
}

fn nanos(duration: Duration) -> u64 {
  u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

//! Per-value spacing.


use alloc::{boxed::Box, collections::VecDeque, sync::Arc};
use core::time::Duration;

use portable_atomic::{AtomicBool, AtomicU64, Ordering};
use spin::Mutex;

use crate::core::{
  demand::Demand,
  flux::Flux,
  publisher::Publisher,
  scheduler::{TimerHandleId, VirtualScheduler},
  signal::Signal,
  signal_drain::SignalDrain,
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
  subscription_control::SubscriptionControl,
};

/// Spaces values by `delay`: a value is delivered `delay` after it arrived or `delay` after the
/// previous delivery, whichever is later.
///
/// Errors skip the queue; completion waits until every queued value was delivered.
pub(crate) struct DelayElementsPublisher<T> {
  upstream:  Flux<T>,
  delay:     Duration,
  scheduler: VirtualScheduler,
}

impl<T> DelayElementsPublisher<T> {
  pub(crate) const fn new(upstream: Flux<T>, delay: Duration, scheduler: VirtualScheduler) -> Self {
    Self { upstream, delay, scheduler }
  }
}

impl<T> Publisher<T> for DelayElementsPublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, downstream: Box<dyn Subscriber<T>>) -> Subscription {
    let control = Arc::new(DelayElementsControl {
      upstream:  Mutex::new(None),
      drain:     SignalDrain::new(downstream),
      scheduler: self.scheduler.clone(),
      delay:     self.delay,
      pending:   Mutex::new(Pending { values: VecDeque::new(), timer: None, complete: false }),
      cancelled: AtomicBool::new(false),
      done:      AtomicBool::new(false),
      discarded: AtomicU64::new(0),
    });
    let subscription = Subscription::from_shared(control.clone());
    let inner = Box::new(DelayElementsInner { control: control.clone() });
    control.drain.start_after(
      || {
        self.upstream.subscribe(inner);
      },
      &subscription,
      || control.is_cancelled(),
    );
    subscription
  }
}

struct Pending<T> {
  values:   VecDeque<T>,
  timer:    Option<TimerHandleId>,
  complete: bool,
}

struct DelayElementsControl<T> {
  upstream:  Mutex<Option<Subscription>>,
  drain:     SignalDrain<T>,
  scheduler: VirtualScheduler,
  delay:     Duration,
  pending:   Mutex<Pending<T>>,
  cancelled: AtomicBool,
  done:      AtomicBool,
  discarded: AtomicU64,
}

impl<T> DelayElementsControl<T>
where
  T: Send + 'static,
{
  fn upstream(&self) -> Option<Subscription> {
    self.upstream.lock().clone()
  }

  fn deliver(&self, signal: Signal<T>) {
    if signal.is_terminal() {
      self.done.store(true, Ordering::Release);
    }
    self.drain.push(signal);
    self.drain.drain(|| self.is_cancelled());
  }

  /// Arms the timer for the head of the queue. Called with the pending lock held.
  fn arm(self: &Arc<Self>, pending: &mut Pending<T>) {
    let control = self.clone();
    pending.timer = Some(self.scheduler.schedule_after(self.delay, move || control.fire()));
  }

  fn enqueue(self: &Arc<Self>, value: T) {
    if self.is_cancelled() {
      self.discarded.fetch_add(1, Ordering::AcqRel);
      return;
    }
    let mut pending = self.pending.lock();
    pending.values.push_back(value);
    if pending.timer.is_none() {
      self.arm(&mut pending);
    }
  }

  fn fire(self: &Arc<Self>) {
    let (value, complete) = {
      let mut pending = self.pending.lock();
      pending.timer = None;
      let value = pending.values.pop_front();
      if !pending.values.is_empty() {
        self.arm(&mut pending);
      }
      (value, pending.complete && pending.values.is_empty())
    };
    if let Some(value) = value {
      self.deliver(Signal::Value(value));
    }
    if complete {
      self.deliver(Signal::Complete);
    }
  }

  fn upstream_complete(&self) {
    let now = {
      let mut pending = self.pending.lock();
      pending.complete = true;
      pending.values.is_empty() && pending.timer.is_none()
    };
    if now {
      self.deliver(Signal::Complete);
    }
  }

  fn clear_pending(&self) -> u64 {
    let mut pending = self.pending.lock();
    if let Some(timer) = pending.timer.take() {
      self.scheduler.cancel(timer);
    }
    let discarded = pending.values.len() as u64;
    pending.values.clear();
    discarded
  }
}

impl<T> SubscriptionControl for DelayElementsControl<T>
where
  T: Send + 'static,
{
  fn request(&self, amount: u64) {
    if let Some(upstream) = self.upstream() {
      upstream.request(amount);
    }
  }

  fn cancel(&self) {
    if self.cancelled.swap(true, Ordering::AcqRel) {
      return;
    }
    if let Some(upstream) = self.upstream() {
      upstream.cancel();
    }
    let discarded = self.clear_pending();
    self.discarded.fetch_add(discarded, Ordering::AcqRel);
    self.drain.discard();
    self.drain.drain(|| true);
  }

  fn is_cancelled(&self) -> bool {
    self.cancelled.load(Ordering::Acquire)
  }

  fn is_terminated(&self) -> bool {
    self.is_cancelled() || self.done.load(Ordering::Acquire)
  }

  fn demand(&self) -> Demand {
    self.upstream().map_or(Demand::Finite(0), |upstream| upstream.demand())
  }

  fn dropped_count(&self) -> u64 {
    let upstream = self.upstream().map_or(0, |upstream| upstream.dropped_count());
    upstream + self.discarded.load(Ordering::Acquire) + self.drain.discarded_count()
  }
}

struct DelayElementsInner<T> {
  control: Arc<DelayElementsControl<T>>,
}

impl<T> Subscriber<T> for DelayElementsInner<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    *self.control.upstream.lock() = Some(subscription.clone());
  }

  fn on_next(&mut self, value: T) {
    self.control.enqueue(value);
  }

  fn on_error(&mut self, error: StreamError) {
    let discarded = self.control.clear_pending();
    self.control.discarded.fetch_add(discarded, Ordering::AcqRel);
    self.control.deliver(Signal::Error(error));
  }

  fn on_complete(&mut self) {
    self.control.upstream_complete();
  }
}

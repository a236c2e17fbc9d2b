//! Whole-sequence time shift.


use alloc::{boxed::Box, collections::BTreeMap, sync::Arc};
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

/// Delivers every upstream signal, terminal ones included, `delay` after it arrived.
pub(crate) struct DelaySequencePublisher<T> {
  upstream:  Flux<T>,
  delay:     Duration,
  scheduler: VirtualScheduler,
}

impl<T> DelaySequencePublisher<T> {
  pub(crate) const fn new(upstream: Flux<T>, delay: Duration, scheduler: VirtualScheduler) -> Self {
    Self { upstream, delay, scheduler }
  }
}

impl<T> Publisher<T> for DelaySequencePublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, downstream: Box<dyn Subscriber<T>>) -> Subscription {
    let control = Arc::new(DelaySequenceControl {
      upstream:  Mutex::new(None),
      drain:     SignalDrain::new(downstream),
      scheduler: self.scheduler.clone(),
      delay:     self.delay,
      timers:    Mutex::new(BTreeMap::new()),
      next_key:  AtomicU64::new(0),
      cancelled: AtomicBool::new(false),
      done:      AtomicBool::new(false),
      discarded: AtomicU64::new(0),
    });
    let subscription = Subscription::from_shared(control.clone());
    let inner = Box::new(DelaySequenceInner { control: control.clone() });
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

struct DelaySequenceControl<T> {
  upstream:  Mutex<Option<Subscription>>,
  drain:     SignalDrain<T>,
  scheduler: VirtualScheduler,
  delay:     Duration,
  /// In-flight signals keyed by arrival order; the flag marks values.
  timers:    Mutex<BTreeMap<u64, (TimerHandleId, bool)>>,
  next_key:  AtomicU64,
  cancelled: AtomicBool,
  done:      AtomicBool,
  discarded: AtomicU64,
}

impl<T> DelaySequenceControl<T>
where
  T: Send + 'static,
{
  fn upstream(&self) -> Option<Subscription> {
    self.upstream.lock().clone()
  }

  fn defer(self: &Arc<Self>, signal: Signal<T>) {
    if self.is_cancelled() {
      if signal.is_value() {
        self.discarded.fetch_add(1, Ordering::AcqRel);
      }
      return;
    }
    let key = self.next_key.fetch_add(1, Ordering::AcqRel);
    let is_value = signal.is_value();
    let control = self.clone();
    let handle = self.scheduler.schedule_after(self.delay, move || control.fire(key, signal));
    self.timers.lock().insert(key, (handle, is_value));
  }

  fn fire(&self, key: u64, signal: Signal<T>) {
    self.timers.lock().remove(&key);
    if signal.is_terminal() {
      self.done.store(true, Ordering::Release);
    }
    self.drain.push(signal);
    self.drain.drain(|| self.is_cancelled());
  }
}

impl<T> SubscriptionControl for DelaySequenceControl<T>
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
    let pending: BTreeMap<u64, (TimerHandleId, bool)> = core::mem::take(&mut *self.timers.lock());
    let mut discarded = 0;
    for (handle, is_value) in pending.into_values() {
      if self.scheduler.cancel(handle) && is_value {
        discarded += 1;
      }
    }
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

struct DelaySequenceInner<T> {
  control: Arc<DelaySequenceControl<T>>,
}

impl<T> Subscriber<T> for DelaySequenceInner<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    *self.control.upstream.lock() = Some(subscription.clone());
  }

  fn on_next(&mut self, value: T) {
    self.control.defer(Signal::Value(value));
  }

  fn on_error(&mut self, error: StreamError) {
    self.control.defer(Signal::Error(error));
  }

  fn on_complete(&mut self) {
    self.control.defer(Signal::Complete);
  }
}

//! Periodic counter driven by a [`VirtualScheduler`].

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, sync::Arc};
use core::time::Duration;

use portable_atomic::{AtomicU64, Ordering};
use spin::Mutex;

use crate::core::{
  emitter::Emitter,
  emitter_config::EmitterConfig,
  producer::Producer,
  publisher::Publisher,
  scheduler::{TimerHandleId, VirtualScheduler},
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Emits `0, 1, 2, ...` at `period`, `2 * period`, ... after subscription; never completes.
///
/// A tick without outstanding demand fails the subscription with a demand-exceeded violation.
pub(crate) struct IntervalSource {
  period:    Duration,
  scheduler: VirtualScheduler,
}

impl IntervalSource {
  /// A zero period is raised to one nanosecond so an advance always terminates.
  pub(crate) fn new(period: Duration, scheduler: VirtualScheduler) -> Self {
    Self { period: period.max(Duration::from_nanos(1)), scheduler }
  }
}

impl Publisher<u64> for IntervalSource {
  fn subscribe(&self, subscriber: Box<dyn Subscriber<u64>>) -> Subscription {
    let producer = IntervalProducer { period: self.period, scheduler: self.scheduler.clone(), ticker: None };
    Subscription::for_producer(subscriber, Box::new(producer), EmitterConfig::default())
  }
}

struct IntervalProducer {
  period:    Duration,
  scheduler: VirtualScheduler,
  ticker:    Option<Arc<Ticker>>,
}

impl Producer<u64> for IntervalProducer {
  fn produce(&mut self, emitter: &Emitter<u64>) {
    if self.ticker.is_some() {
      return;
    }
    let ticker = Arc::new(Ticker {
      emitter:   emitter.clone(),
      scheduler: self.scheduler.clone(),
      period:    self.period,
      count:     AtomicU64::new(0),
      timer:     Mutex::new(None),
    });
    ticker.schedule_next();
    self.ticker = Some(ticker);
  }

  fn on_cancel(&mut self) {
    if let Some(ticker) = self.ticker.take() {
      ticker.stop();
    }
  }
}

struct Ticker {
  emitter:   Emitter<u64>,
  scheduler: VirtualScheduler,
  period:    Duration,
  count:     AtomicU64,
  timer:     Mutex<Option<TimerHandleId>>,
}

impl Ticker {
  fn schedule_next(self: &Arc<Self>) {
    let ticker = self.clone();
    let handle = self.scheduler.schedule_after(self.period, move || ticker.tick());
    *self.timer.lock() = Some(handle);
  }

  fn tick(self: &Arc<Self>) {
    self.timer.lock().take();
    if self.emitter.is_terminated() {
      return;
    }
    let tick = self.count.fetch_add(1, Ordering::AcqRel);
    self.emitter.next(tick);
    if !self.emitter.is_terminated() {
      self.schedule_next();
    }
  }

  fn stop(&self) {
    if let Some(handle) = self.timer.lock().take() {
      self.scheduler.cancel(handle);
    }
  }
}

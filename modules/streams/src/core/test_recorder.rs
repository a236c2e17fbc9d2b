use alloc::{boxed::Box, sync::Arc, vec::Vec};

use spin::Mutex;

use crate::core::{StreamError, Subscriber, Subscription};

struct RecorderLog<T> {
  subscribed:   usize,
  subscription: Option<Subscription>,
  values:       Vec<T>,
  completed:    usize,
  errors:       Vec<StreamError>,
}

/// Records everything delivered to a [`RecorderSubscriber`].
pub(crate) struct Recorder<T> {
  log: Arc<Mutex<RecorderLog<T>>>,
}

/// Subscriber requesting `initial` on subscribe and `per_value` after each value.
pub(crate) struct RecorderSubscriber<T> {
  log:       Arc<Mutex<RecorderLog<T>>>,
  initial:   u64,
  per_value: u64,
}

impl<T> Recorder<T>
where
  T: Clone + Send + 'static,
{
  pub(crate) fn new(initial: u64) -> (Self, Box<dyn Subscriber<T>>) {
    Self::with_refill(initial, 0)
  }

  pub(crate) fn with_refill(initial: u64, per_value: u64) -> (Self, Box<dyn Subscriber<T>>) {
    let log = Arc::new(Mutex::new(RecorderLog {
      subscribed:   0,
      subscription: None,
      values:       Vec::new(),
      completed:    0,
      errors:       Vec::new(),
    }));
    (Self { log: log.clone() }, Box::new(RecorderSubscriber { log, initial, per_value }))
  }

  pub(crate) fn values(&self) -> Vec<T> {
    self.log.lock().values.clone()
  }

  pub(crate) fn subscribed(&self) -> usize {
    self.log.lock().subscribed
  }

  pub(crate) fn completed(&self) -> usize {
    self.log.lock().completed
  }

  pub(crate) fn errors(&self) -> Vec<StreamError> {
    self.log.lock().errors.clone()
  }

  pub(crate) fn subscription(&self) -> Subscription {
    self.log.lock().subscription.clone().expect("subscribed")
  }
}

impl<T> Subscriber<T> for RecorderSubscriber<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    {
      let mut log = self.log.lock();
      log.subscribed += 1;
      log.subscription = Some(subscription.clone());
    }
    if self.initial > 0 {
      subscription.request(self.initial);
    }
  }

  fn on_next(&mut self, value: T) {
    let subscription = {
      let mut log = self.log.lock();
      log.values.push(value);
      log.subscription.clone()
    };
    if self.per_value > 0
      && let Some(subscription) = subscription
    {
      subscription.request(self.per_value);
    }
  }

  fn on_error(&mut self, error: StreamError) {
    self.log.lock().errors.push(error);
  }

  fn on_complete(&mut self) {
    self.log.lock().completed += 1;
  }
}

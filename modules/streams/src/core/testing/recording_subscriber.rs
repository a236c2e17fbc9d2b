//! Subscriber buffering signals between verification points.

use alloc::{collections::VecDeque, sync::Arc};

use spin::Mutex;

use crate::core::{Demand, Signal, StreamError, Subscriber, Subscription};

/// Signals received so far, shared between the subscriber and the verifier.
pub(crate) struct Recording<T> {
  pub(crate) subscribed: bool,
  pub(crate) signals:    VecDeque<Signal<T>>,
}

impl<T> Recording<T> {
  pub(crate) fn shared() -> Arc<Mutex<Self>> {
    Arc::new(Mutex::new(Self { subscribed: false, signals: VecDeque::new() }))
  }
}

/// Records every callback and requests the initial demand on subscribe.
pub(crate) struct RecordingSubscriber<T> {
  recording:      Arc<Mutex<Recording<T>>>,
  initial_demand: Demand,
}

impl<T> RecordingSubscriber<T> {
  pub(crate) const fn new(recording: Arc<Mutex<Recording<T>>>, initial_demand: Demand) -> Self {
    Self { recording, initial_demand }
  }

  fn record(&self, signal: Signal<T>) {
    self.recording.lock().signals.push_back(signal);
  }
}

impl<T> Subscriber<T> for RecordingSubscriber<T>
where
  T: Send,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    self.recording.lock().subscribed = true;
    if self.initial_demand.has_demand() {
      subscription.request(self.initial_demand.as_request());
    }
  }

  fn on_next(&mut self, value: T) {
    self.record(Signal::Value(value));
  }

  fn on_error(&mut self, error: StreamError) {
    self.record(Signal::Error(error));
  }

  fn on_complete(&mut self) {
    self.record(Signal::Complete);
  }
}

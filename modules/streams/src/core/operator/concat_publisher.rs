//! Ordered concatenation of publishers.


use alloc::{boxed::Box, sync::Arc, vec::Vec};

use spin::Mutex;

use crate::core::{
  demand::Demand, demand_tracker::DemandTracker, flux::Flux, publisher::Publisher, signal::Signal,
  signal_drain::SignalDrain, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
  subscription_control::SubscriptionControl,
};

/// Subscribes to each source only after the previous one completed.
///
/// The first error ends the whole sequence; later sources are never subscribed.
pub(crate) struct ConcatPublisher<T> {
  sources: Arc<[Flux<T>]>,
}

impl<T> ConcatPublisher<T> {
  pub(crate) fn new(sources: Vec<Flux<T>>) -> Self {
    Self { sources: sources.into() }
  }
}

impl<T> Publisher<T> for ConcatPublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, downstream: Box<dyn Subscriber<T>>) -> Subscription {
    let control = Arc::new(ConcatControl {
      sources: self.sources.clone(),
      state:   Mutex::new(ConcatState {
        next:      0,
        current:   None,
        retired:   Vec::new(),
        demand:    DemandTracker::new(),
        cancelled: false,
        done:      false,
      }),
      drain:   SignalDrain::new(downstream),
    });
    let subscription = Subscription::from_shared(control.clone());
    control.drain.start(&subscription, || control.is_cancelled());
    control.subscribe_next();
    subscription
  }
}

struct ConcatState {
  next:      usize,
  current:   Option<Subscription>,
  retired:   Vec<Subscription>,
  demand:    DemandTracker,
  cancelled: bool,
  done:      bool,
}

struct ConcatControl<T> {
  sources: Arc<[Flux<T>]>,
  state:   Mutex<ConcatState>,
  drain:   SignalDrain<T>,
}

impl<T> ConcatControl<T>
where
  T: Send + 'static,
{
  fn deliver(&self, signal: Signal<T>) {
    self.drain.push(signal);
    self.drain.drain(|| self.is_cancelled());
  }

  fn subscribe_next(self: &Arc<Self>) {
    let source = {
      let mut state = self.state.lock();
      if state.cancelled || state.done {
        return;
      }
      if let Some(previous) = state.current.take() {
        state.retired.push(previous);
      }
      let source = self.sources.get(state.next).cloned();
      state.next += 1;
      if source.is_none() {
        state.done = true;
      }
      source
    };
    match source {
      | Some(source) => {
        source.subscribe(Box::new(ConcatInner { control: self.clone() }));
      },
      | None => self.deliver(Signal::Complete),
    }
  }

  fn attach(&self, subscription: &Subscription) {
    let outstanding = {
      let mut state = self.state.lock();
      if state.cancelled || state.done {
        None
      } else {
        state.current = Some(subscription.clone());
        Some(state.demand.current())
      }
    };
    match outstanding {
      | None => subscription.cancel(),
      | Some(demand) if demand.has_demand() => subscription.request(demand.as_request()),
      | Some(_) => {},
    }
  }

  fn inner_next(&self, value: T) {
    let _ = self.state.lock().demand.consume_one();
    self.deliver(Signal::Value(value));
  }

  fn inner_error(&self, error: StreamError) {
    {
      let mut state = self.state.lock();
      if state.done {
        return;
      }
      state.done = true;
    }
    self.deliver(Signal::Error(error));
  }
}

impl<T> SubscriptionControl for ConcatControl<T>
where
  T: Send + 'static,
{
  fn request(&self, amount: u64) {
    let (current, result) = {
      let mut state = self.state.lock();
      if state.cancelled || state.done {
        return;
      }
      let result = state.demand.request(amount);
      if result.is_err() {
        state.done = true;
      }
      (state.current.clone(), result)
    };
    match result {
      | Ok(_) => {
        if let Some(current) = current {
          current.request(amount);
        }
      },
      | Err(violation) => {
        tracing::debug!(%violation, "invalid request terminates concatenation");
        if let Some(current) = current {
          current.cancel();
        }
        self.deliver(Signal::Error(violation.into()));
      },
    }
  }

  fn cancel(&self) {
    let current = {
      let mut state = self.state.lock();
      if state.cancelled || (state.done && !self.drain.has_pending()) {
        return;
      }
      state.cancelled = true;
      state.current.clone()
    };
    if let Some(current) = current {
      current.cancel();
    }
    let discarded = self.drain.discard();
    tracing::trace!(discarded, "concat cancelled");
    self.drain.drain(|| true);
  }

  fn is_cancelled(&self) -> bool {
    self.state.lock().cancelled
  }

  fn is_terminated(&self) -> bool {
    let state = self.state.lock();
    state.cancelled || state.done
  }

  fn demand(&self) -> Demand {
    self.state.lock().demand.current()
  }

  fn dropped_count(&self) -> u64 {
    let subscriptions: Vec<Subscription> = {
      let state = self.state.lock();
      state.retired.iter().chain(state.current.iter()).cloned().collect()
    };
    self.drain.discarded_count() + subscriptions.iter().map(Subscription::dropped_count).sum::<u64>()
  }
}

struct ConcatInner<T> {
  control: Arc<ConcatControl<T>>,
}

impl<T> Subscriber<T> for ConcatInner<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    self.control.attach(subscription);
  }

  fn on_next(&mut self, value: T) {
    self.control.inner_next(value);
  }

  fn on_error(&mut self, error: StreamError) {
    self.control.inner_error(error);
  }

  fn on_complete(&mut self) {
    self.control.subscribe_next();
  }
}

//! Demand-tracking subscription shared by every emitter-backed source.


use alloc::{boxed::Box, sync::Arc};

use portable_atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use spin::Mutex;

use crate::core::{
  demand::Demand, demand_tracker::DemandTracker, emitter::Emitter, emitter_config::EmitterConfig,
  producer::Producer, protocol_violation::ProtocolViolation, signal::Signal, signal_drain::SignalDrain,
  stream_error::StreamError, subscriber::Subscriber, subscription::Subscription, subscription_state::SubscriptionState,
};

/// Bookkeeping guarded by a single lock.
struct Ledger {
  tracker:   DemandTracker,
  state:     SubscriptionState,
  config:    EmitterConfig,
  requested: bool,
}

enum Admission {
  Deliver,
  Drop,
  Violation,
}

/// Subscription state shared between the producer-side [`Emitter`] and the subscriber-side
/// [`Subscription`].
///
/// Deliveries go through a [`SignalDrain`]; producer runs are serialised the same way, with a
/// work-in-progress counter, so both the subscriber and the producer may re-enter `request` and
/// `cancel`. The producer never runs before `on_subscribe` has returned; demand requested from
/// inside `on_subscribe` is only recorded.
pub(crate) struct SubscriptionCore<T> {
  ledger:      Mutex<Ledger>,
  dropped:     AtomicU64,
  drain:       SignalDrain<T>,
  producer:    Mutex<Option<Box<dyn Producer<T>>>>,
  produce_wip: AtomicUsize,
  started:     AtomicBool,
}

impl<T> SubscriptionCore<T>
where
  T: Send + 'static,
{
  pub(crate) fn new(subscriber: Box<dyn Subscriber<T>>, producer: Box<dyn Producer<T>>, config: EmitterConfig) -> Self {
    Self {
      ledger:      Mutex::new(Ledger {
        tracker: DemandTracker::new(),
        state: SubscriptionState::Active,
        config,
        requested: false,
      }),
      dropped:     AtomicU64::new(0),
      drain:       SignalDrain::new(subscriber),
      producer:    Mutex::new(Some(producer)),
      produce_wip: AtomicUsize::new(0),
      started:     AtomicBool::new(false),
    }
  }

  /// Hands the subscription to the subscriber, then lets the producer run.
  pub(crate) fn start(self: &Arc<Self>, subscription: &Subscription) {
    self.drain.start(subscription, || self.state() == SubscriptionState::Cancelled);
    self.started.store(true, Ordering::Release);
    self.drive();
  }

  pub(crate) fn state(&self) -> SubscriptionState {
    self.ledger.lock().state
  }

  pub(crate) fn demand(&self) -> Demand {
    self.ledger.lock().tracker.current()
  }

  pub(crate) fn was_requested(&self) -> bool {
    self.ledger.lock().requested
  }

  /// Values refused by the ledger plus values discarded from the delivery queue.
  pub(crate) fn dropped_count(&self) -> u64 {
    self.dropped.load(Ordering::Acquire) + self.drain.discarded_count()
  }

  pub(crate) fn request(self: &Arc<Self>, amount: u64) {
    let result = {
      let mut ledger = self.ledger.lock();
      if ledger.state.is_terminated() {
        return;
      }
      ledger.requested = true;
      let result = ledger.tracker.request(amount);
      if result.is_err() {
        ledger.state = SubscriptionState::Failed;
      }
      result
    };
    match result {
      | Ok(_) => self.drive(),
      | Err(violation) => {
        tracing::debug!(%violation, "invalid request terminates subscription");
        self.drain.push(Signal::Error(violation.into()));
        self.drain();
        self.drive();
      },
    }
  }

  pub(crate) fn cancel(self: &Arc<Self>) {
    {
      let mut ledger = self.ledger.lock();
      match ledger.state {
        | SubscriptionState::Cancelled => return,
        | SubscriptionState::Completed | SubscriptionState::Failed if !self.drain.has_pending() => return,
        | _ => ledger.state = SubscriptionState::Cancelled,
      }
    }
    let discarded = self.drain.discard();
    tracing::trace!(discarded, "subscription cancelled");
    self.drain();
    self.drive();
  }

  pub(crate) fn emit_next(self: &Arc<Self>, value: T) {
    match self.admit_value() {
      | Admission::Deliver => {
        self.drain.push(Signal::Value(value));
        self.drain();
      },
      | Admission::Drop => self.record_drop(1),
      | Admission::Violation => {
        self.record_drop(1);
        tracing::debug!("value emitted without outstanding demand");
        self.drain.push(Signal::Error(ProtocolViolation::DemandExceeded.into()));
        self.drain();
        self.drive();
      },
    }
  }

  pub(crate) fn emit_complete(self: &Arc<Self>) {
    self.emit_terminal(Signal::Complete, SubscriptionState::Completed);
  }

  pub(crate) fn emit_error(self: &Arc<Self>, error: StreamError) {
    self.emit_terminal(Signal::Error(error), SubscriptionState::Failed);
  }

  fn emit_terminal(self: &Arc<Self>, signal: Signal<T>, next: SubscriptionState) {
    {
      let mut ledger = self.ledger.lock();
      if ledger.state.is_terminated() {
        tracing::trace!(state = ?ledger.state, "terminal signal after termination ignored");
        return;
      }
      ledger.state = next;
    }
    self.drain.push(signal);
    self.drain();
    self.drive();
  }

  fn admit_value(&self) -> Admission {
    let mut ledger = self.ledger.lock();
    if ledger.state.is_terminated() {
      return Admission::Drop;
    }
    if ledger.tracker.consume_one() {
      return Admission::Deliver;
    }
    if ledger.config.strict_on_overflow_demand() {
      ledger.state = SubscriptionState::Failed;
      return Admission::Violation;
    }
    Admission::Drop
  }

  fn record_drop(&self, count: u64) {
    let total = self.dropped.fetch_add(count, Ordering::AcqRel) + count;
    tracing::trace!(dropped = total, "value dropped");
  }

  fn drain(&self) {
    self.drain.drain(|| self.state() == SubscriptionState::Cancelled);
  }

  /// Lets the producer react to a start, demand change, cancellation or termination.
  fn drive(self: &Arc<Self>) {
    if !self.started.load(Ordering::Acquire) {
      return;
    }
    if self.produce_wip.fetch_add(1, Ordering::AcqRel) != 0 {
      return;
    }
    let emitter = Emitter::from_core(self.clone());
    let mut missed = 1;
    loop {
      {
        let mut guard = self.producer.lock();
        if let Some(producer) = guard.as_mut() {
          if self.state() == SubscriptionState::Active {
            producer.produce(&emitter);
          }
          match self.state() {
            | SubscriptionState::Active => {},
            | SubscriptionState::Cancelled => {
              producer.on_cancel();
              guard.take();
            },
            | SubscriptionState::Completed | SubscriptionState::Failed => {
              guard.take();
            },
          }
        }
      }
      let previous = self.produce_wip.fetch_sub(missed, Ordering::AcqRel);
      missed = previous - missed;
      if missed == 0 {
        break;
      }
    }
  }
}

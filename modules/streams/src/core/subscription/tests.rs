use alloc::{format, sync::Arc};

use portable_atomic::{AtomicBool, AtomicU64, Ordering};

use super::Subscription;
use crate::core::{Demand, SubscriptionControl};

#[derive(Default)]
struct CountingControl {
  requested: AtomicU64,
  cancelled: AtomicBool,
}

impl SubscriptionControl for Arc<CountingControl> {
  fn request(&self, amount: u64) {
    self.requested.fetch_add(amount.min(1_000), Ordering::SeqCst);
  }

  fn cancel(&self) {
    self.cancelled.store(true, Ordering::SeqCst);
  }

  fn is_cancelled(&self) -> bool {
    self.cancelled.load(Ordering::SeqCst)
  }

  fn is_terminated(&self) -> bool {
    self.is_cancelled()
  }

  fn demand(&self) -> Demand {
    Demand::Finite(self.requested.load(Ordering::SeqCst))
  }

  fn dropped_count(&self) -> u64 {
    0
  }
}

#[test]
fn handle_delegates_to_control() {
  let control = Arc::new(CountingControl::default());
  let subscription = Subscription::new(control.clone());
  let clone = subscription.clone();

  subscription.request(3);
  clone.request_unbounded();
  assert_eq!(subscription.demand(), Demand::Finite(1_003));

  clone.cancel();
  assert!(subscription.is_cancelled());
  assert!(subscription.is_terminated());
  assert_eq!(subscription.dropped_count(), 0);
}

#[test]
fn debug_lists_observable_state() {
  let subscription = Subscription::new(Arc::new(CountingControl::default()));
  let rendered = format!("{subscription:?}");
  assert!(rendered.starts_with("Subscription"));
  assert!(rendered.contains("cancelled: false"));
}

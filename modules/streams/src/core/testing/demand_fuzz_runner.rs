//! Deterministic demand fuzzing.

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, sync::Arc};

use portable_atomic::{AtomicU64, Ordering};

use super::{DemandFuzzReport, TestPublisher, TestPublisherConfig};
use crate::core::{Publisher, StreamError, Subscriber};

/// Drives a lenient [`TestPublisher`] with a pseudo-random mix of emissions, requests and
/// cancellations.
///
/// The sequence depends only on the seed, so a failing run can be replayed.
pub struct DemandFuzzRunner {
  state: u64,
}

impl DemandFuzzRunner {
  /// Creates a runner with a deterministic seed.
  #[must_use]
  pub const fn new(seed: u64) -> Self {
    Self { state: seed }
  }

  const fn next_u32(&mut self) -> u32 {
    self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
    (self.state >> 32) as u32
  }

  /// Performs `steps` random operations against a fresh subscription and reports the counts.
  pub fn run(&mut self, steps: usize) -> DemandFuzzReport {
    let config = TestPublisherConfig::default().with_strict_on_overflow_demand(false);
    let publisher = TestPublisher::create_noncompliant(config);
    let observed = Arc::new(AtomicU64::new(0));
    let subscription = publisher.subscribe(Box::new(CountingSubscriber { observed: observed.clone() }));
    let mut attempted = 0_u64;

    for _ in 0..steps {
      match self.next_u32() % 64 {
        | 0 => subscription.cancel(),
        | 1..=24 => subscription.request(u64::from(self.next_u32() % 4) + 1),
        | _ => {
          publisher.next(self.next_u32());
          attempted += 1;
        },
      }
    }

    let report = DemandFuzzReport::new(attempted, observed.load(Ordering::Acquire), subscription.dropped_count());
    tracing::debug!(
      attempted = report.attempted(),
      observed = report.observed(),
      dropped = report.dropped(),
      "demand fuzz run finished"
    );
    report
  }
}

struct CountingSubscriber {
  observed: Arc<AtomicU64>,
}

impl Subscriber<u32> for CountingSubscriber {
  fn on_next(&mut self, _value: u32) {
    self.observed.fetch_add(1, Ordering::AcqRel);
  }

  fn on_error(&mut self, _error: StreamError) {}

  fn on_complete(&mut self) {}
}

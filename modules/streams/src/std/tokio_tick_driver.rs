//! Tokio task advancing a virtual scheduler in real time.

extern crate std;


use core::time::Duration;

use tokio::{
  runtime::Handle,
  task::JoinHandle,
  time::{Instant, MissedTickBehavior, interval},
};

use super::TickDriverError;
use crate::core::VirtualScheduler;

/// Moves a [`VirtualScheduler`] forward by the runtime's elapsed time at a fixed resolution.
///
/// Scheduled actions therefore run at most one resolution late. Time measured by tokio is used,
/// so a paused runtime also pauses the scheduler. The task stops on [`shutdown`](Self::shutdown)
/// or when the driver is dropped.
#[derive(Debug)]
pub struct TokioTickDriver {
  task:       JoinHandle<()>,
  resolution: Duration,
}

impl TokioTickDriver {
  /// Starts driving `scheduler` on the current tokio runtime.
  ///
  /// # Errors
  ///
  /// Returns [`TickDriverError::NoRuntime`] outside a runtime and
  /// [`TickDriverError::ZeroResolution`] for a zero `resolution`.
  pub fn start(scheduler: VirtualScheduler, resolution: Duration) -> Result<Self, TickDriverError> {
    let handle = Handle::try_current().map_err(|_| TickDriverError::NoRuntime)?;
    Self::start_with_handle(&handle, scheduler, resolution)
  }

  /// Starts driving `scheduler` on the runtime behind `handle`.
  ///
  /// # Errors
  ///
  /// Returns [`TickDriverError::ZeroResolution`] for a zero `resolution`.
  pub fn start_with_handle(
    handle: &Handle,
    scheduler: VirtualScheduler,
    resolution: Duration,
  ) -> Result<Self, TickDriverError> {
    if resolution.is_zero() {
      return Err(TickDriverError::ZeroResolution);
    }
    let task = handle.spawn(async move {
      let origin = Instant::now();
      let base = scheduler.now();
      let mut ticker = interval(resolution);
      ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
      loop {
        ticker.tick().await;
        scheduler.advance_to(base.saturating_add(origin.elapsed()));
      }
    });
    tracing::debug!(resolution_nanos = u64::try_from(resolution.as_nanos()).unwrap_or(u64::MAX), "tick driver started");
    Ok(Self { task, resolution })
  }

  /// Returns the tick resolution.
  #[must_use]
  pub const fn resolution(&self) -> Duration {
    self.resolution
  }

  /// Returns `true` once the driving task stopped.
  #[must_use]
  pub fn is_finished(&self) -> bool {
    self.task.is_finished()
  }

  /// Stops advancing the scheduler.
  pub fn shutdown(&self) {
    self.task.abort();
    tracing::debug!("tick driver stopped");
  }
}

impl Drop for TokioTickDriver {
  fn drop(&mut self) {
    self.task.abort();
  }
}

//! Standard-library adapters.

/// Wall-clock time source.
mod std_monotonic_clock;
/// Tick driver failures.
mod tick_driver_error;
/// Real-time driver for the virtual scheduler.
mod tokio_tick_driver;

pub use std_monotonic_clock::StdMonotonicClock;
pub use tick_driver_error::TickDriverError;
pub use tokio_tick_driver::TokioTickDriver;

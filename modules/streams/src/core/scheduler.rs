//! Logical time and the clocks used to measure verification runs.

/// Monotonic clock abstraction.
mod monotonic_clock;
/// Queue entry ordering (internal).
mod scheduled_action;
/// Identifier of scheduled actions.
mod timer_handle_id;
/// Manually advanced scheduler.
mod virtual_scheduler;

pub use monotonic_clock::MonotonicClock;
pub use timer_handle_id::TimerHandleId;
pub use virtual_scheduler::VirtualScheduler;

//! Core stream engine (`no_std` + `alloc`).

/// Demand model types.
mod demand;
/// Demand tracking utilities.
mod demand_tracker;
/// Producer-side subscription handle.
mod emitter;
/// Emitter configuration.
mod emitter_config;
/// Multi-value publisher.
mod flux;
/// Callback subscriber.
mod lambda_subscriber;
/// Message-only error.
mod message_error;
/// Single-value publisher.
mod mono;
/// Composed publishers.
mod operator;
/// Producer trait.
mod producer;
/// Protocol violation kinds.
mod protocol_violation;
/// Publisher trait.
mod publisher;
/// Logical time.
mod scheduler;
/// Signal enum.
mod signal;
/// Serialised delivery (internal).
mod signal_drain;
/// Originating publishers.
mod source;
/// Stream error definitions.
mod stream_error;
/// Stream error classification.
mod stream_error_kind;
/// Subscriber trait.
mod subscriber;
/// Subscriber-side subscription handle.
mod subscription;
/// Subscription control trait.
mod subscription_control;
/// Demand-tracking subscription (internal).
mod subscription_core;
/// Subscription lifecycle states.
mod subscription_state;
#[cfg(test)]
mod test_recorder;
/// Step verifier and test publisher.
pub mod testing;
/// Shared-pointer wrapper for domain errors.
mod upstream_error;

pub use demand::Demand;
pub use demand_tracker::DemandTracker;
pub use emitter::Emitter;
pub use emitter_config::EmitterConfig;
pub use flux::Flux;
pub use message_error::MessageError;
pub use mono::Mono;
pub use producer::Producer;
pub use protocol_violation::ProtocolViolation;
pub use publisher::Publisher;
pub use scheduler::{MonotonicClock, TimerHandleId, VirtualScheduler};
pub use signal::Signal;
pub use stream_error::StreamError;
pub use stream_error_kind::StreamErrorKind;
pub use subscriber::Subscriber;
pub use subscription::Subscription;
pub use subscription_control::SubscriptionControl;
pub use subscription_state::SubscriptionState;
pub use upstream_error::UpstreamError;

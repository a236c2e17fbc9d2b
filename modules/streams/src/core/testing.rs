//! Test utilities for stream verification.

/// Deterministic demand fuzzing.
mod demand_fuzz_runner;
/// Demand fuzzing outcome.
mod demand_fuzz_report;
/// Error step matching.
mod error_expectation;
/// Subscriber buffering signals for the verifier (internal).
mod recording_subscriber;
/// Scripted verification.
mod step_verifier;
/// Verifier options.
mod step_verifier_options;
/// Manually driven publisher.
mod test_publisher;
/// Test publisher configuration.
mod test_publisher_config;
/// Verification failures.
mod verification_error;
/// Post-verification statistics.
mod verification_report;
/// Script steps (internal).
mod verification_step;

pub use demand_fuzz_report::DemandFuzzReport;
pub use demand_fuzz_runner::DemandFuzzRunner;
pub use step_verifier::StepVerifier;
pub use step_verifier_options::StepVerifierOptions;
pub use test_publisher::TestPublisher;
pub use test_publisher_config::TestPublisherConfig;
pub use verification_error::VerificationError;
pub use verification_report::VerificationReport;

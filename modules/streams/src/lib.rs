#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_let_else)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![cfg_attr(not(test), no_std)]

//! Backpressure-aware reactive streams for the rivulet workspace.
//!
//! The [`core`] module is `no_std` (it only needs `alloc`) and contains the whole engine:
//! signals, publishers, demand-tracking subscriptions, operators, the virtual scheduler and the
//! step verifier. The `std` module adds wall-clock and tokio adapters.

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
pub mod std;

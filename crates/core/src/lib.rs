//! Domain logic for the vehicle telemetry sampler.
//!
//! Contains no I/O: lookback token parsing and the shared domain error
//! type used by the client and API crates.

pub mod error;
pub mod lookback;

//! Data API protocol types and service definitions.
//!
//! Generated Protocol Buffer types for the backend telemetry data
//! service (`dataapi.v1`). The sampler only uses the client stub; the
//! server stub exists so integration tests can run an in-process mock
//! backend against the same contract.

pub mod v1 {
    tonic::include_proto!("dataapi.v1");
}

pub use v1::*;

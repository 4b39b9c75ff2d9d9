//! Data API gRPC client library.
//!
//! Wraps the generated `dataapi.v1` client stub with the sampler's query
//! construction (latest vs. windowed), stream draining, and the
//! degrade-to-empty policy on backend failure.

pub mod client;
pub mod config;

pub use client::{DataApiClient, DataApiClientError};
pub use config::DataApiConfig;

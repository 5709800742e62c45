//! # stratus-api
//!
//! Client for the Stratus Cloud Controller API.
//!
//! This crate defines the data model shared across the CLI, the
//! [`CloudClient`] boundary trait that the actor layer orchestrates
//! against, and the reqwest-based [`HttpClient`] implementation.
//!
//! Every operation is a single REST call. Results always travel together
//! with the warnings the platform attached to the response, even when the
//! call itself failed. Aggregation across calls is the actor layer's job,
//! never this crate's.
//!
//! ```text
//! ┌──────────────┐    CloudClient     ┌──────────────────┐
//! │ stratus-actor│◄──────────────────►│ Cloud Controller │
//! └──────────────┘    (HTTP/JSON)     └──────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod query;
pub mod types;

pub use client::{CallOutcome, CloudClient};
pub use error::ClientError;
pub use http::HttpClient;
pub use query::{Filter, FilterField};
pub use types::{
    Application, InstanceState, Lifecycle, Organization, Process, ProcessInstance, ProcessScale,
    SecurityGroup, Space, Warnings,
};

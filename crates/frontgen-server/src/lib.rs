//! Mock API server for local front-end development.
//!
//! Answers requests for every described endpoint with its example payloads, so the UI can
//! run without a real backend.

pub mod mock;

pub use mock::{MockApi, MockResponse, MockServer, MockServerConfig, ServerError};

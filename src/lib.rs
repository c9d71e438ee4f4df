//! Local HTTP gateway for the Tink financial-data API.
//!
//! The gateway exchanges OAuth authorization codes for access tokens,
//! forwards authenticated calls under `/api-proxy` to the upstream API,
//! and serves the bundled front-end (static assets plus an `index.html`
//! fallback for every unmatched path).

pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod response;
pub mod server;
pub mod upstream;

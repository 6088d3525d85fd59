//! Page fetch adapter
//!
//! Everything the pipeline knows about HTTP lives here: client construction,
//! parallelism capping, request pacing, and host allow-listing.

mod client;

pub use client::{build_http_client, Fetcher};

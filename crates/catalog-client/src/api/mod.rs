//! Jikan API v4 client implementation.
//!
//! This module provides a timeout-bounded, single-request client for the
//! manga endpoints of the Jikan API (MyAnimeList unofficial API).

pub mod client;
pub mod transport;
pub mod types;

pub use client::JikanClient;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use types::*;

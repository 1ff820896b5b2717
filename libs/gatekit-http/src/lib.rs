#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Outbound JSON client for third-party registries.
//!
//! One pooled hyper client behind a small tower stack:
//! - HTTPS only unless a test opts into plain HTTP
//! - stack-level request timeout
//! - default `User-Agent` when the caller sets none
//! - transparent gzip/brotli/deflate decoding
//! - a bounded number of redirects
//!
//! [`HttpClient::fetch_json`] adds a per-call deadline that also covers the
//! body read, and caps the decoded body size.
//!
//! ```ignore
//! use gatekit_http::{FetchOptions, HttpClient};
//!
//! let client = HttpClient::builder().user_agent("barboo/0.1").build()?;
//! let address: Address = client
//!     .fetch_json("https://brasilapi.com.br/api/cep/v1/01001000", &FetchOptions::default())
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod fetch;
mod response;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig, TransportSecurity};
pub use error::{HttpError, IntegrationError};
pub use fetch::{DEFAULT_FETCH_TIMEOUT, FetchOptions};
pub use response::ResponseBody;

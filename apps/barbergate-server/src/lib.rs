#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Barbergate HTTP server: login, barbershop access checks and registry lookups.

pub mod api;
pub mod config;
pub mod logging;
pub mod state;

pub use api::router;
pub use config::AppConfig;
pub use state::AppState;

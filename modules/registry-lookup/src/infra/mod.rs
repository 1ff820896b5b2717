//! Postal-code registry clients.

mod brasil_api;
mod viacep;

pub use brasil_api::BrasilApiPostalCodes;
pub use viacep::ViaCepPostalCodes;

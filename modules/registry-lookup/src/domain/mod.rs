pub mod geocode;
pub mod model;
pub mod postal_code;
pub mod service;
pub mod tax_id;

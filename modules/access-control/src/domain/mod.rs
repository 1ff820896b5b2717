pub mod authn;
pub mod client_ip;
pub mod error;
pub mod login;
pub mod membership;
pub mod model;
pub mod pipeline;
pub mod ports;
pub mod tenant_gate;

use self::ports::StoreError;
use error::Denial;

/// Log a collaborator failure and hide its details from the caller.
fn internal(operation: &str, e: &StoreError) -> Denial {
    tracing::error!(operation, error = ?e, "access-control collaborator failed");
    Denial::Internal
}

use access_control::MembershipRole;
use serde::{Deserialize, Serialize};

/// Missing fields deserialize as empty and are rejected as bad credentials.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarbershopAccessDto {
    pub tenant_id: String,
    pub role: MembershipRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedBarbershopDto {
    pub tenant_id: String,
}

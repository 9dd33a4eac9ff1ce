use crate::shared::decode::{DecodeError, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

/// Response of `POST /api/auth/refresh` (refresh token sent as bearer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// Response of `GET /api/auth/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Operador,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

fn require_token(field: &str, token: &str) -> Result<(), DecodeError> {
    if token.trim().is_empty() {
        return Err(DecodeError::invalid(field, "token vazio"));
    }
    Ok(())
}

impl Validate for LoginResponse {
    fn validate(&self) -> Result<(), DecodeError> {
        require_token("access_token", &self.access_token)?;
        require_token("refresh_token", &self.refresh_token)
    }
}

impl Validate for RefreshResponse {
    fn validate(&self) -> Result<(), DecodeError> {
        require_token("access_token", &self.access_token)
    }
}

impl Validate for ProfileResponse {}

use serde::{Deserialize, Serialize};

/// Login body, accepted as JSON or form-encoded.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session status reported to the client by login and auth/check.
#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl AuthStatus {
    pub fn authenticated(username: String) -> Self {
        Self {
            authenticated: true,
            username: Some(username),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            username: None,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::text::lenient_text;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub username: Option<String>,
    /// Argon2id PHC string, or plaintext for rows written outside this service.
    pub password: Option<String>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordReset {
    #[serde(deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub new_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsernameChange {
    #[serde(deserialize_with = "lenient_text")]
    pub old_username: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub new_username: Option<String>,
}

//! Authentication ports.
//!
//! Identities are issued by an external provider; the server only validates
//! bearer tokens and reads the subject out of them.

/// Claims read from a validated bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// Provider-issued subject id, matched against `UserProfile::firebase_user_id`.
    pub subject: String,
    pub email: Option<String>,
    pub exp: i64,
}

/// Token service trait for bearer token operations.
pub trait TokenService: Send + Sync {
    /// Issue a token for a provider subject. Used by tooling and tests; real
    /// clients obtain tokens from the identity provider.
    fn generate_token(&self, subject: &str, email: Option<&str>) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("No user profile for this identity")]
    UnknownProfile,
}

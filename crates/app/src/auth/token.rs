//! JWT access-token generation and validation.
//!
//! Access tokens are HMAC-signed JWTs carrying a [`Claims`] payload. The
//! signing key, lifetime and algorithm come from [`AuthConfig`], which is
//! always passed explicitly; the issue time is supplied by the caller so
//! token contents stay deterministic under test.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use showtrack_core::types::{Timestamp, UserId};
use thiserror::Error;

/// Identity block nested inside every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    /// The user's UUID in string form.
    pub id: String,
    /// The user's stored role name (`"USER"` or `"ADMIN"`).
    pub role: String,
}

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated identity.
    pub user: TokenUser,
    /// Subject -- the user's UUID in string form, mirroring `user.id`.
    pub sub: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Failure kinds for token validation.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token's `exp` claim is in the past.
    #[error("Access token has expired")]
    Expired,

    /// The signature does not match the configured key and algorithm.
    #[error("Access token signature is invalid")]
    BadSignature,

    /// The token is not a structurally valid JWT for this service.
    #[error("Access token is malformed: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Configuration for access-token generation and validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime.
    pub token_ttl: Duration,
    /// Signing algorithm (HS256, HS384 or HS512).
    pub algorithm: Algorithm,
}

/// Default access token lifetime in seconds.
const DEFAULT_TTL_SECS: i64 = 900;

impl AuthConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var         | Required | Default |
    /// |-----------------|----------|---------|
    /// | `JWT_SECRET`    | **yes**  | --      |
    /// | `JWT_TTL_SECS`  | no       | `900`   |
    /// | `JWT_ALGORITHM` | no       | `HS256` |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty, or if an override
    /// does not parse.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let ttl_secs: i64 = std::env::var("JWT_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TTL_SECS.to_string())
            .parse()
            .expect("JWT_TTL_SECS must be a valid i64");

        let algorithm: Algorithm = match std::env::var("JWT_ALGORITHM") {
            Ok(name) => name
                .parse()
                .expect("JWT_ALGORITHM must be a supported algorithm name"),
            Err(_) => Algorithm::HS256,
        };

        Self {
            secret,
            token_ttl: Duration::seconds(ttl_secs),
            algorithm,
        }
    }
}

/// Issue a signed access token for the given user.
///
/// The `sub` claim and `user.id` both carry the stringified user UUID;
/// `exp` is `issued_at` plus the configured lifetime, in whole seconds.
pub fn issue_access_token(
    user_id: UserId,
    role: &str,
    issued_at: Timestamp,
    config: &AuthConfig,
) -> Result<String, TokenError> {
    let iat = issued_at.timestamp();
    let exp = iat + config.token_ttl.num_seconds();
    let id = user_id.to_string();

    let claims = Claims {
        user: TokenUser {
            id: id.clone(),
            role: role.to_string(),
        },
        sub: id,
        iat,
        exp,
    };

    let token = encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Verifies the signature, the signing algorithm, and the `exp` claim.
/// Tokens signed with a different key or algorithm, or with a tampered
/// payload, do not verify.
pub fn decode_access_token(token: &str, config: &AuthConfig) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(config.algorithm),
    )?;
    Ok(token_data.claims)
}

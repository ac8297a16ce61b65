//! JWT issuance and verification.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime in seconds (168 hours).
pub const TOKEN_TTL_SECS: u64 = 168 * 60 * 60;

/// The only accepted signing algorithm.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `iat` | `iat` | issued-at, seconds since epoch |
/// | `exp` | `exp` | `iat` + [`TOKEN_TTL_SECS`] |
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

/// Reasons a token is rejected by [`verify_token`].
///
/// Callers must not forward the variant to clients; every variant maps to the
/// same unauthorized outcome.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("unexpected signing algorithm")]
    UnexpectedAlgorithm,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Error returned by [`issue_token`] when signing fails.
#[derive(Debug, thiserror::Error)]
#[error("could not sign token: {0}")]
pub struct SignError(#[from] jsonwebtoken::errors::Error);

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign a token for `user_id` that expires [`TOKEN_TTL_SECS`] from now.
pub fn issue_token(user_id: Uuid, key: &[u8]) -> Result<IssuedToken, SignError> {
    issue_token_at(user_id, key, now_secs())
}

/// Sign a token as if issued at `issued_at` (seconds since epoch).
pub fn issue_token_at(user_id: Uuid, key: &[u8], issued_at: u64) -> Result<IssuedToken, SignError> {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        iat: issued_at,
        exp: issued_at + TOKEN_TTL_SECS,
    };
    let token = encode(
        &Header::new(TOKEN_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(key),
    )?;
    Ok(IssuedToken {
        token,
        expires_at: claims.exp,
    })
}

/// Verify a token and return the user ID bound to it.
///
/// Validation: HS256 only, zero leeway on `exp`, required claims `exp` + `sub`,
/// and `sub` must parse as a UUID. The caller still has to resolve the ID to a
/// live user and treat a miss exactly like a rejected token.
pub fn verify_token(token: &str, key: &[u8]) -> Result<Uuid, AuthError> {
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(key), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnexpectedAlgorithm
            }
            _ => AuthError::Malformed,
        })?;

    data.claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)
}

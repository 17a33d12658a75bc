//! Session token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use k12_config::AuthConfig;
use k12_models::{Email, UserId};

use crate::claims::SessionClaims;
use crate::error::AuthError;

/// Signs a session token for `uid`, valid for `config.session_expiry` seconds.
pub fn create_session_token(
    uid: &UserId,
    email: &Email,
    config: &AuthConfig,
) -> Result<(String, SessionClaims), AuthError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now.saturating_add(config.session_expiry.max(0) as usize);

    let claims = SessionClaims {
        sub: uid.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok((token, claims))
}

/// Checks the signature and expiry of a session token.
pub fn verify_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

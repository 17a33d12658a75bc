//! Claims carried by a persisted session token.

use serde::{Deserialize, Serialize};

/// JWT claims for a signed-in session.
///
/// - `sub`: account uid
/// - `email`: sign-in email
/// - `jti`: unique token id, the key used to revoke the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    pub jti: String,
}

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub secret: String,
    /// Session token lifetime in seconds.
    pub session_expiry: i64,
    /// Where a signed-in session token is kept between runs.
    pub session_file: PathBuf,
    pub bcrypt_cost: u32,
    pub min_password_length: u64,
    /// Delete a freshly created account when its profile document cannot be written.
    pub rollback_orphaned_accounts: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: "k12-dev-secret-change-in-production".to_string(),
            session_expiry: 604800, // 7 days
            session_file: PathBuf::from("storage/session.jwt"),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_password_length: 6,
            rollback_orphaned_accounts: false,
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.secret),
            session_expiry: env::var("SESSION_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.session_expiry),
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bcrypt_cost),
            min_password_length: env::var("MIN_PASSWORD_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_password_length),
            rollback_orphaned_accounts: env::var("ROLLBACK_ORPHANED_ACCOUNTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rollback_orphaned_accounts),
        }
    }
}

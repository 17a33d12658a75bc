//! # K12 Auth
//!
//! Authentication for the K12 client.
//!
//! This crate provides:
//!
//! - [`provider`]: The [`AuthProvider`] trait the session manager talks to
//! - [`claims`] / [`jwt`]: Signed session tokens kept between runs
//! - [`memory`]: [`MemoryAuth`], a process-local provider for tests and demos
//! - [`redis`]: [`RedisAuth`], accounts in Redis with a token-backed session
//!
//! # Example
//!
//! ```ignore
//! use k12_auth::{AuthProvider, MemoryAuth};
//!
//! let auth = MemoryAuth::new(4);
//! let user = auth.create_account(&email, "secret123").await?;
//! assert_eq!(auth.current_user(), Some(user));
//! auth.sign_out();
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod memory;
pub mod password;
pub mod provider;
pub mod redis;

pub use claims::SessionClaims;
pub use error::AuthError;
pub use jwt::{create_session_token, verify_session_token};
pub use memory::MemoryAuth;
pub use provider::{AuthProvider, StoredAccount};
pub use redis::RedisAuth;

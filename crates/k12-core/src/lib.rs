//! # K12 Core
//!
//! Core types, errors, and utilities shared by every K12 crate.
//!
//! - [`errors`]: The client-wide error taxonomy and [`AppError`]
//! - [`password`]: Password hashing and verification
//! - [`time`]: Monotonic epoch-millisecond timestamps for new records
//!
//! # Example
//!
//! ```ignore
//! use k12_core::{AppError, ErrorKind};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! assert_eq!(error.kind, ErrorKind::NotFound);
//! println!("{}", error.user_message());
//! ```

pub mod errors;
pub mod password;
pub mod time;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use password::{hash_password, verify_password};
pub use time::now_millis;

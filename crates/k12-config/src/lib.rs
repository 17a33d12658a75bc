//! # K12 Config
//!
//! Configuration types for the K12 client.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`store`]: Document store backend selection and connection settings
//! - [`auth`]: Session token, password, and registration settings
//! - [`batch`]: Bulk write group sizing
//!
//! # Example
//!
//! ```ignore
//! use k12_config::{AuthConfig, BatchConfig, StoreConfig};
//!
//! // Load all configs from environment
//! let store_config = StoreConfig::from_env();
//! let auth_config = AuthConfig::from_env();
//! let batch_config = BatchConfig::from_env();
//! ```

pub mod auth;
pub mod batch;
pub mod store;

// Re-export commonly used types at crate root
pub use auth::AuthConfig;
pub use batch::BatchConfig;
pub use store::{StoreBackend, StoreConfig};

//! # K12
//!
//! Client core for a K12 school-management app: parents follow their
//! children's attendance, homework, exams, fees and notices; teachers manage
//! their class and message parents.
//!
//! ## Overview
//!
//! The crate is the data-access and session layer behind the screens:
//!
//! - **Repository layer**: typed create / get / query over a document store,
//!   one collection per entity, with store-assigned ids
//! - **Batch writes**: bulk creation in concurrent groups that tolerate
//!   partial failure
//! - **Session**: login, registration, role dispatch and logout, driven by a
//!   small navigation state machine
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── k12-core/          # AppError, password hashing, timestamps
//! ├── k12-config/        # Env-driven store, auth and batch settings
//! ├── k12-models/        # Entities, ids, DTOs
//! ├── k12-store/         # DocumentStore trait, memory and Redis backends
//! ├── k12-auth/          # AuthProvider trait, memory and Redis providers
//! └── k12-observability/ # Logging and counters
//! src/
//! ├── batch.rs           # Grouped concurrent writes
//! ├── cli/               # Demo data seeding
//! ├── modules/           # Feature modules
//! │   ├── repository.rs  # Entity <-> document mapping
//! │   ├── session/       # Session manager and navigator
//! │   ├── students/      # One service per entity
//! │   └── ...
//! └── state.rs           # Backend selection and shared state
//! ```
//!
//! Each feature module exposes a stateless `XxxService` whose methods take
//! the store as their first argument.
//!
//! ## Quick Start
//!
//! ```bash
//! STORE_BACKEND=redis
//! REDIS_URL=redis://127.0.0.1:6379
//! JWT_SECRET=your-secure-secret-key
//! BATCH_GROUP_SIZE=5
//! ```
//!
//! ```bash
//! cargo run --bin k12-cli -- seed-students --classes 3 --per-class 4
//! cargo run --bin k12
//! ```
//!
//! ## Modules
//!
//! - [`batch`]: Grouped concurrent writes and their reports
//! - [`cli`]: Generated demo data
//! - [`modules`]: Feature modules (students, attendance, session, ...)
//! - [`state`]: Backend selection and shared application state

pub mod batch;
pub mod cli;
pub mod modules;
pub mod state;

// Re-export workspace crates for convenience
pub use k12_auth;
pub use k12_config;
pub use k12_core;
pub use k12_models;
pub use k12_store;

//! Common utilities and shared types for petgallery.
//!
//! This crate provides foundational components used across all petgallery crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Sessions**: Signed, expiring session tokens via [`SessionSigner`]
//! - **Storage**: Local file storage for uploaded pet photos
//!
//! # Example
//!
//! ```no_run
//! use petgallery_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod session;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use session::{SESSION_COOKIE, SESSION_MAX_AGE_SECS, SessionSigner};
pub use storage::{LocalStorage, StorageBackend, StoredFile, sanitize_filename};

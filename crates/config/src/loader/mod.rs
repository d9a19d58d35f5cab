//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files, environment variables, and
//!   JSON profile files.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical
//!   configuration merging.
//! - Enforce the `DOTENV_DISABLED` gate to prevent accidental dotenv
//!   loading in tests.
//!
//! Invariants:
//! - Environment variables take precedence over profile file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` loading.

mod builder;
mod env;
mod error;
mod profile;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

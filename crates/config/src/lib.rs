//! Configuration for the spindex workspace.
//!
//! Responsibilities:
//! - Define the `Config` consumed by the admin client and the CLI.
//! - Load configuration from JSON profile files, `.env` files, and
//!   `SPINDEX_*` environment variables, in that precedence order
//!   (later sources override earlier ones; CLI flags are applied last
//!   by the caller).
//!
//! Does NOT handle:
//! - Building HTTP clients (see `spindex-client`).
//! - Command-line parsing (see `crates/cli`).

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthStrategy, Config, ConnectionConfig, PathRules, ProfileConfig};

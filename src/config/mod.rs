//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment / .env overlay (RPC_URL, PRIVATE_KEY, *_ADDRESS)
//!     → validation.rs (semantic checks on tuning knobs)
//!     → AppConfig (immutable, passed by value to the client wrappers)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Required deployment values fail at first use, not at load time

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, overlay_env, read_config, ConfigError};
pub use schema::{
    AppConfig, ContractsConfig, GasConfig, InterfaceConfig, NetworkConfig, ObservabilityConfig,
    SignerConfig,
};

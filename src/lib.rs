//! Symmio contract action runner.
//!
//! Runs one read or write action against the Symmio trading diamond or the
//! MultiAccount proxy per invocation.

pub mod actions;
pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod observability;

pub use actions::{Action, ActionContext, ActionOutput};
pub use blockchain::{ActionError, ActionResult};
pub use config::AppConfig;

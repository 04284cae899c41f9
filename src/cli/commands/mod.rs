//! CLI command implementations.

mod config;
mod fetch;
mod info;
mod mcp;

pub use config::run_config;
pub use fetch::run_fetch;
pub use info::run_info;
pub use mcp::run_mcp;

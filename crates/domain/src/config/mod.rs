//! Configuration module for dnsblast
//!
//! - `root`: Main configuration and CLI overrides
//! - `target`: Resolver under test (host, port, timeout)
//! - `load`: Names, repeat count and concurrency cap
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod load;
pub mod logging;
pub mod root;
pub mod target;

pub use errors::ConfigError;
pub use load::LoadConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use target::TargetConfig;

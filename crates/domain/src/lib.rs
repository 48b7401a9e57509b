//! dnsblast Domain Layer
pub mod config;
pub mod dispatch_target;
pub mod domain_name;
pub mod errors;
pub mod query_job;
pub mod query_outcome;

pub use config::{CliOverrides, Config, ConfigError};
pub use dispatch_target::DispatchTarget;
pub use domain_name::DomainName;
pub use errors::DomainError;
pub use query_job::QueryJob;
pub use query_outcome::{QueryOutcome, QueryResponse};

use crate::DomainError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Destination shared by every query of a run.
///
/// Built once before dispatch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    pub host: Arc<str>,
    pub port: u16,
    pub timeout: Duration,
}

impl DispatchTarget {
    pub fn new(host: impl Into<Arc<str>>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.host.trim().is_empty() {
            return Err(DomainError::InvalidConfiguration(
                "target host cannot be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(DomainError::InvalidConfiguration(
                "target timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

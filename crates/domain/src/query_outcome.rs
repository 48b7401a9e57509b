use crate::DomainError;
use std::time::Duration;

/// Reply surfaced to the caller. Nothing here is validated against the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub id: u16,
    pub rcode: &'static str,
    pub authentic_data: bool,
    /// TXT strings, one entry per TXT record (character-strings concatenated).
    pub answers: Vec<String>,
    pub edns_payload: Option<u16>,
    pub size: usize,
    pub latency: Duration,
}

/// Result of a single send/receive attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Response(QueryResponse),
    Timeout,
    TransportError(String),
    InvalidName(String),
}

impl QueryOutcome {
    pub fn is_response(&self) -> bool {
        matches!(self, QueryOutcome::Response(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, QueryOutcome::Timeout)
    }

    pub fn response(&self) -> Option<&QueryResponse> {
        match self {
            QueryOutcome::Response(r) => Some(r),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueryOutcome::Response(_) => "response",
            QueryOutcome::Timeout => "timeout",
            QueryOutcome::TransportError(_) => "transport_error",
            QueryOutcome::InvalidName(_) => "invalid_name",
        }
    }
}

impl From<Result<QueryResponse, DomainError>> for QueryOutcome {
    fn from(result: Result<QueryResponse, DomainError>) -> Self {
        match result {
            Ok(response) => QueryOutcome::Response(response),
            Err(DomainError::QueryTimeout) => QueryOutcome::Timeout,
            Err(DomainError::InvalidDomainName(msg)) => QueryOutcome::InvalidName(msg),
            Err(e) => QueryOutcome::TransportError(e.to_string()),
        }
    }
}

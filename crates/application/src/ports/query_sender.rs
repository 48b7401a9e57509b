use async_trait::async_trait;
use dnsblast_domain::{DispatchTarget, DomainError, DomainName, QueryResponse};

/// Sends one TXT query for `name` to `target` and waits for one reply.
///
/// Implementations build a fresh message per call and own the socket for
/// the duration of the call.
#[async_trait]
pub trait QuerySender: Send + Sync {
    /// # Errors
    ///
    /// * `DomainError::QueryTimeout` - No reply within `target.timeout`
    /// * `DomainError::InvalidDomainName` - The name cannot be encoded
    /// * `DomainError::Transport` - Socket level send/receive failure
    /// * `DomainError::InvalidDnsResponse` - Reply could not be decoded
    async fn send_query(
        &self,
        name: &DomainName,
        target: &DispatchTarget,
    ) -> Result<QueryResponse, DomainError>;
}

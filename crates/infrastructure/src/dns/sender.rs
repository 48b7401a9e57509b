use super::query::{ResponseParser, TxtQueryBuilder};
use super::transport::UdpTransport;
use async_trait::async_trait;
use dnsblast_application::ports::QuerySender;
use dnsblast_domain::{DispatchTarget, DomainError, DomainName, QueryResponse};
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, warn};

/// Sends TXT queries over plain UDP.
///
/// Stateless: every call builds a fresh query and uses its own socket, so one
/// instance can be shared by every dispatch task.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpQuerySender;

impl UdpQuerySender {
    pub fn new() -> Self {
        Self
    }

    async fn resolve(target: &DispatchTarget) -> Result<SocketAddr, DomainError> {
        if let Ok(ip) = target.host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, target.port));
        }

        let mut addrs = tokio::net::lookup_host((&*target.host, target.port))
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to resolve {}: {}", target, e)))?;

        addrs
            .next()
            .ok_or_else(|| DomainError::Transport(format!("No address found for {}", target)))
    }
}

#[async_trait]
impl QuerySender for UdpQuerySender {
    async fn send_query(
        &self,
        name: &DomainName,
        target: &DispatchTarget,
    ) -> Result<QueryResponse, DomainError> {
        let query = TxtQueryBuilder::build_for(name)?;
        let bytes = query.to_wire()?;
        let server_addr = Self::resolve(target).await?;

        debug!(
            name = %name,
            id = query.id(),
            server = %server_addr,
            "Sending TXT query"
        );

        let transport = UdpTransport::new(server_addr);
        let raw = transport.send(&bytes, target.timeout).await?;
        let response = ResponseParser::parse(&raw.bytes, raw.latency)?;

        if response.id != query.id() {
            warn!(
                name = %name,
                expected_id = query.id(),
                received_id = response.id,
                "Response ID does not match query"
            );
        }

        Ok(response)
    }
}

pub mod udp;

use std::time::Duration;

pub use udp::UdpTransport;

/// Result of a raw DNS exchange
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
    /// Time from sending the query to receiving the reply
    pub latency: Duration,
}

pub mod query;
pub mod sender;
pub mod transport;

pub use query::{ensure_opt_record, QueryMessage, ResponseParser, TxtQueryBuilder};
pub use sender::UdpQuerySender;
pub use transport::{TransportResponse, UdpTransport};

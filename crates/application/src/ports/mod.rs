pub mod query_sender;

pub use query_sender::QuerySender;

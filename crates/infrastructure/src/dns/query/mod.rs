pub mod builder;
pub mod response_parser;

pub use builder::{ensure_opt_record, QueryMessage, TxtQueryBuilder, EDNS_MAX_PAYLOAD};
pub use response_parser::ResponseParser;

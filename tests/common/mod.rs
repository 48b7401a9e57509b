#![allow(dead_code)]


pub use fixtures::{names, target_for, TestNames};
pub use test_server::{SeenQuery, TestServer, TestServerBuilder};

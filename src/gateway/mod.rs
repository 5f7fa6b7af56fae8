//! Gateway construction and cache-aside orchestration

mod builder;
mod fetch;

pub use builder::{Muninn, MuninnBuilder};
pub use fetch::FetchGateway;

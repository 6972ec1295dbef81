pub mod config;
pub mod logging;

pub mod director;
pub mod error;
pub mod header_meta;
pub mod link;
pub mod namespace;
pub mod proxy;
pub mod resolve;
pub mod transfer;

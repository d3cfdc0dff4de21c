#![allow(clippy::async_fn_in_trait)]
pub mod common;
pub mod discovery;
pub mod server;
pub mod storage;
pub mod traits;

pub use discovery::service::DiscoveryService;
pub use server::daemon::daemon_start;

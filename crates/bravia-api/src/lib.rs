// bravia-api: Async Rust client for the Sony Bravia IP control endpoints

pub mod client;
pub mod error;
pub mod transport;

pub use client::{BraviaClient, CommandEntry};
pub use error::Error;
pub use transport::TransportConfig;

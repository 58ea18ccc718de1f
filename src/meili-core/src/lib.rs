//! meili-core
//!
//! Wire types and configuration shared by the meili-rs client:
//! - Index, document, settings and search payloads
//! - Asynchronous update records
//! - Client configuration

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, FetchErrorPolicy, WaitConfig};
pub use models::*;

//! Remote object-store client for the appsync engine
//!
//! Defines the [`RemoteStore`] capability surface consumed by the sync core,
//! the typed sync configuration, and the HTTP implementation.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{Payload, RemoteStore};
pub use config::{CONFIG_FILE, SyncConfig};
pub use error::{Error, Result};
pub use http::HttpRemote;

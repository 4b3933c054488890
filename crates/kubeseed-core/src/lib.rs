//! Kubeseed Core - Core types for cluster seed resolution

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;

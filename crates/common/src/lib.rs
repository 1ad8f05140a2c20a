//! Shared utilities, configuration, and error handling for Jobboard
//!
//! This crate provides common functionality used across the Jobboard application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Salted-hash crypto for passwords and access tokens
//! - Custom axum extractors

pub mod config;
pub mod crypto;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use crypto::{compute_hash_prefix, hash_secret, verify_secret_hash};
pub use error::{Error, Result};
pub use extractors::ValidatedJson;

//! Common types and utilities shared across Polymath crates.
//!
//! This crate defines the shared error type and the observability helpers
//! used by every binary in the workspace. It is dependency‑minimal so the
//! config and core crates can both depend on it.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`PolymathError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use polymath_common::PolymathError;
//!
//! let err = PolymathError::UnknownSubject(9);
//! assert_eq!(err.to_string(), "No subject with id 9");
//! ```
pub mod observability;

/// Error types used across the Polymath system.
#[derive(thiserror::Error, Debug)]
pub enum PolymathError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A subject id was requested that the registry does not know.
    #[error("No subject with id {0}")]
    UnknownSubject(u32),
}

/// Convenient alias for results that use [`PolymathError`].
pub type Result<T> = std::result::Result<T, PolymathError>;

//! # Solara Core
//!
//! Core utilities and foundational types for the Solara ray tracer.
//!
//! This crate provides:
//! - Common error types and result aliases
//! - Logging and tracing infrastructure
//! - Vector, matrix, and transform math

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod math;

pub use error::{Error, Result};
pub use math::{Mat4, Transform, Vec2, Vec3};

/// Solara version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize core systems (logging, etc.)
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., logging already initialized)
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    tracing::info!("Solara v{VERSION} initialized");
    Ok(())
}

//! Infrastructure layer: I/O implementations
//!
//! This layer implements the I/O boundary traits used by the services.

pub mod error;
pub mod traits;

pub use error::InfraError;

pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod locator;
pub mod models;
pub mod snapshot;
pub mod utils;

// Re-export error types for convenience
pub use error::{ExportError, Result};

//! Input/output, configuration and error handling

/// Command-line interface for batch map processing
pub mod cli;
/// Constants and runtime configuration
pub mod configuration;
/// Error types
pub mod error;
/// PNG map loading and route rendering
pub mod image;
/// Progress display for batch processing
pub mod progress;

//! Input/output operations and error handling

/// Durable snapshot of an initialised color pool
pub mod catalogue;
/// Command-line parsing and command execution
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// Source decoding and atomic PNG export
pub mod image;
/// Terminal progress display
pub mod progress;

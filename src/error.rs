//! Error types and result handling for line-relay.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use line_relay::{Error, Result};
//!
//! fn resolve_brokers() -> Result<Vec<String>> {
//!     // Simulating a configuration error
//!     Err(Error::Config("KAFKA_BOOTSTRAP_SERVERS is empty".to_string()))
//! }
//!
//! match resolve_brokers() {
//!     Ok(brokers) => println!("Connecting to {:?}", brokers),
//!     Err(Error::Config(msg)) => eprintln!("Configuration error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for line-relay operations.
///
/// Fatal errors (`Config`, `FileAccess`, `Io`) abort the run; a `Kafka`
/// error from a single delivery is logged by the relay loop and the run
/// continues with the next line.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error, typically from invalid environment variables.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input file is missing or unreadable. Raised before any message
    /// is sent.
    #[error("Cannot open input file {path:?}: {source}")]
    FileAccess {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// I/O error while iterating the input file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Kafka client or producer error.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
}

/// A convenient Result type alias for line-relay operations.
///
/// This is equivalent to `std::result::Result<T, line_relay::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

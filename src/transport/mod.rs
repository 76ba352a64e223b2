//! Transport adapters feeding the stream decoder
//!
//! The decoder core is transport-agnostic: anything that can hand it byte
//! chunks and fire its timeout can host it. This module provides the one
//! transport the system actually runs over, an async serial link.

mod serial;

pub use serial::{available_port_names, SerialConfig, SerialLink, SerialParity};

use thiserror::Error;

/// Transport error types
#[derive(Error, Debug)]
pub enum TransportError {
    /// Opening the serial port failed
    #[error("failed to open serial port {port}: {source}")]
    Open {
        /// Port name as configured
        port: String,
        /// Underlying serial error
        #[source]
        source: tokio_serial::Error,
    },

    /// Enumerating system serial ports failed
    #[error("port enumeration failed: {0}")]
    Enumeration(#[from] serialport::Error),

    /// I/O error on an open port
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

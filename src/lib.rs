//! # Framesync
//!
//! Frame synchronizer and validator for multi-channel serial telemetry
//! streams. Recovers fixed-size framed packets from a noisy byte stream:
//!
//! - Locates `"$DC"`-marked frame boundaries in arbitrary byte chunks
//! - Verifies frame integrity with CRC-16/CCITT-FALSE
//! - Emits decoded 11-channel samples and link liveness transitions
//! - Keeps a bounded per-channel history for visualization consumers
//!
//! The core ([`StreamDecoder`]) is synchronous, single-threaded, and free of
//! timers, so it can be driven directly from tests. The optional
//! [`SerialLink`] adapter pumps a `tokio-serial` port through a decoder and
//! owns the single-shot liveness timeout.
//!
//! ## Example
//!
//! ```rust
//! use framesync::{encode_frame, DecoderEvent, StreamDecoder};
//!
//! let mut decoder = StreamDecoder::default();
//! let frame = encode_frame(&[7; 11]);
//!
//! let events = decoder.push(&frame);
//! assert!(events
//!     .iter()
//!     .any(|e| matches!(e, DecoderEvent::SampleDecoded { values, .. } if values == &[7; 11])));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod decoder;
pub mod logger;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use crate::decoder::{
    ChannelHistory, DecoderConfig, DecoderEvent, LinkState, SamplePoint, StreamDecoder,
};
pub use crate::logger::{LogFormat, SampleLogger};
pub use crate::protocol::checksum::crc16_ccitt;
pub use crate::protocol::frame::{
    decode_frame, encode_frame, FrameError, CHANNEL_COUNT, FRAME_LEN, SYNC_MARKER,
};
pub use crate::transport::{
    available_port_names, SerialConfig, SerialLink, SerialParity, TransportError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Wire protocol for the telemetry frame format
//!
//! Pure, stateless building blocks: the CRC-16/CCITT-FALSE checksum and the
//! fixed 16-byte frame layout with its decode/validate logic. Stream-level
//! concerns (partial delivery, resynchronization) live in [`crate::decoder`].

pub mod checksum;
pub mod frame;

pub use checksum::{crc16_ccitt, verify_crc16_ccitt};
pub use frame::{decode_frame, encode_frame, FrameError, CHANNEL_COUNT, FRAME_LEN, SYNC_MARKER};

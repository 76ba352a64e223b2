//! Frame layout and validation
//!
//! A frame is a fixed 16-byte unit: the 3-byte sync marker `"$DC"`, one
//! unsigned 8-bit sample per channel, and a big-endian CRC-16/CCITT-FALSE
//! over everything preceding it.
//!
//! ```text
//! offset  0       3                  14        16
//!         +-------+------------------+---------+
//!         | "$DC" | 11 x u8 samples  | CRC BE  |
//!         +-------+------------------+---------+
//! ```

use super::checksum::crc16_ccitt;
use thiserror::Error;

/// The 3-byte sequence marking the start of a frame.
pub const SYNC_MARKER: &[u8; 3] = b"$DC";

/// Total frame length on the wire, in bytes.
pub const FRAME_LEN: usize = 16;

/// Number of sample channels carried per frame.
pub const CHANNEL_COUNT: usize = 11;

/// Length of the region the checksum covers (marker + payload).
pub const CHECKED_LEN: usize = FRAME_LEN - 2;

/// Frame validation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The frame trailer did not match the computed checksum
    #[error("checksum mismatch: received {received:#06x}, computed {computed:#06x}")]
    ChecksumMismatch {
        /// Checksum carried in the frame trailer
        received: u16,
        /// Checksum computed over the first 14 bytes
        computed: u16,
    },
}

/// Validate a 16-byte candidate frame and extract its payload.
///
/// The caller guarantees `candidate` is exactly [`FRAME_LEN`] bytes and
/// starts with [`SYNC_MARKER`]; the stream decoder extracts candidates only
/// at discovered marker positions, so violating this is a caller bug, not a
/// recoverable condition.
///
/// # Errors
///
/// Returns [`FrameError::ChecksumMismatch`] when the big-endian trailer does
/// not equal the CRC-16/CCITT-FALSE of the first 14 bytes.
pub fn decode_frame(candidate: &[u8]) -> Result<[u8; CHANNEL_COUNT], FrameError> {
    debug_assert_eq!(candidate.len(), FRAME_LEN, "candidate must be a full frame");
    debug_assert_eq!(
        &candidate[..SYNC_MARKER.len()],
        SYNC_MARKER,
        "candidate must start at a sync marker"
    );

    let computed = crc16_ccitt(&candidate[..CHECKED_LEN]);
    let received = u16::from_be_bytes([candidate[CHECKED_LEN], candidate[CHECKED_LEN + 1]]);
    if received != computed {
        return Err(FrameError::ChecksumMismatch { received, computed });
    }

    let mut values = [0u8; CHANNEL_COUNT];
    values.copy_from_slice(&candidate[SYNC_MARKER.len()..CHECKED_LEN]);
    Ok(values)
}

/// Build a well-formed frame for a payload.
///
/// Counterpart of [`decode_frame`], used by tests, benches, and device
/// simulators.
#[must_use]
pub fn encode_frame(values: &[u8; CHANNEL_COUNT]) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[..SYNC_MARKER.len()].copy_from_slice(SYNC_MARKER);
    frame[SYNC_MARKER.len()..CHECKED_LEN].copy_from_slice(values);
    let crc = crc16_ccitt(&frame[..CHECKED_LEN]);
    frame[CHECKED_LEN..].copy_from_slice(&crc.to_be_bytes());
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let values = [0, 1, 2, 3, 4, 5, 250, 251, 252, 253, 255];
        let frame = encode_frame(&values);

        assert_eq!(&frame[..3], SYNC_MARKER);
        assert_eq!(decode_frame(&frame), Ok(values));
    }

    #[test]
    fn test_payload_bit_flip_rejected() {
        let mut frame = encode_frame(&[0x55; CHANNEL_COUNT]);
        frame[7] ^= 0x01;

        assert!(matches!(
            decode_frame(&frame),
            Err(FrameError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_trailer_corruption_rejected() {
        let mut frame = encode_frame(&[9; CHANNEL_COUNT]);
        frame[15] = frame[15].wrapping_add(1);

        assert!(decode_frame(&frame).is_err());
    }

    #[test]
    fn test_checksum_is_big_endian() {
        // All-zero payload: trailer must hold the CRC high byte first.
        let frame = encode_frame(&[0; CHANNEL_COUNT]);
        let crc = crc16_ccitt(&frame[..CHECKED_LEN]);
        assert_eq!(frame[14], (crc >> 8) as u8);
        assert_eq!(frame[15], (crc & 0xFF) as u8);
    }
}

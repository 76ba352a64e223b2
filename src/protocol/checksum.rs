//! CRC-16/CCITT-FALSE checksum
//!
//! Polynomial: 0x1021, Init: 0xFFFF, RefIn: false, RefOut: false, XorOut: 0x0000

/// Compute CRC-16/CCITT-FALSE over a byte slice.
///
/// Bit-serial, MSB-first. Returns the final register value with no output
/// XOR, so `crc16_ccitt(&[])` is the initial value `0xFFFF`.
#[must_use]
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;

    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

/// Check `data` against a big-endian CRC-16/CCITT-FALSE trailer.
#[must_use]
pub fn verify_crc16_ccitt(data: &[u8], checksum: &[u8; 2]) -> bool {
    crc16_ccitt(data) == u16::from_be_bytes(*checksum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_init_value() {
        assert_eq!(crc16_ccitt(&[]), 0xFFFF);
    }

    #[test]
    fn test_single_zero_byte() {
        assert_eq!(crc16_ccitt(&[0x00]), 0xE1F0);
    }

    #[test]
    fn test_check_value() {
        // Standard CRC-16/CCITT-FALSE check: "123456789" -> 0x29B1
        assert_eq!(crc16_ccitt(b"123456789"), 0x29B1);
    }

    #[test]
    fn test_single_bit_changes_crc() {
        let data = [0x24, 0x44, 0x43, 0x01, 0x02, 0x03];
        let reference = crc16_ccitt(&data);
        for i in 0..data.len() {
            for bit in 0..8 {
                let mut corrupted = data;
                corrupted[i] ^= 1 << bit;
                assert_ne!(crc16_ccitt(&corrupted), reference);
            }
        }
    }

    #[test]
    fn test_verify_big_endian_trailer() {
        let data = b"123456789";
        assert!(verify_crc16_ccitt(data, &[0x29, 0xB1]));
        assert!(!verify_crc16_ccitt(data, &[0xB1, 0x29]));
    }
}

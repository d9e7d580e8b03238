//! Record framing
//!
//! On-disk layout of one record:
//!
//! ```text
//! +------------------------+-------------------+
//! | length L (u64, 8B, BE) | payload (L bytes) |
//! +------------------------+-------------------+
//! ```
//!
//! Records are stored back-to-back. There is no file header, footer or
//! checksum.

/// Width of the length prefix in bytes
pub const LEN_WIDTH: u64 = 8;

/// Encodes a payload length as a big-endian prefix.
pub fn encode_len(len: u64) -> [u8; LEN_WIDTH as usize] {
    len.to_be_bytes()
}

/// Decodes a big-endian length prefix.
pub fn decode_len(prefix: [u8; LEN_WIDTH as usize]) -> u64 {
    u64::from_be_bytes(prefix)
}

/// Total bytes a record with `payload_len` bytes occupies on disk.
///
/// Returns `None` if the total does not fit in a u64.
pub fn record_size(payload_len: u64) -> Option<u64> {
    payload_len.checked_add(LEN_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_big_endian() {
        assert_eq!(encode_len(3), [0, 0, 0, 0, 0, 0, 0, 3]);
        assert_eq!(encode_len(0x0102), [0, 0, 0, 0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_decode_len() {
        assert_eq!(decode_len([0, 0, 0, 0, 0, 0, 0, 0]), 0);
        assert_eq!(decode_len([0, 0, 0, 0, 0, 0, 1, 0]), 256);
        assert_eq!(decode_len([0xff; 8]), u64::MAX);
    }

    #[test]
    fn test_record_size() {
        assert_eq!(record_size(0), Some(8));
        assert_eq!(record_size(3), Some(11));
        assert_eq!(record_size(u64::MAX - 8), Some(u64::MAX));
        assert_eq!(record_size(u64::MAX - 7), None);
    }
}

use crate::id3v2::regex;

/// Reverse the byte order of a size field.
///
/// Byte 0 trades places with byte 3 and byte 1 with byte 2. The permutation
/// is its own inverse, so the same transform takes a raw field to a size and
/// a size back to a raw field.
pub fn swap_size(raw: u32) -> u32 {
    let b0 = (raw & 0x0000_00FF) << 24;
    let b1 = (raw & 0x0000_FF00) << 8;
    let b2 = (raw & 0x00FF_0000) >> 8;
    let b3 = (raw & 0xFF00_0000) >> 24;
    b0 | b1 | b2 | b3
}

// the field is laid down least significant byte first, then swapped
pub fn decode_size(field: [u8; 4]) -> u32 {
    swap_size(u32::from_le_bytes(field))
}

pub fn encode_size(size: u32) -> [u8; 4] {
    swap_size(size).to_le_bytes()
}

// anything else is padding or audio, i.e. the tag is over
pub fn is_frame_id(input: &[u8]) -> bool {
    regex::frame_id().is_match(input)
}

pub fn frame_name(input: &[u8]) -> String {
    String::from_utf8_lossy(input).into_owned()
}

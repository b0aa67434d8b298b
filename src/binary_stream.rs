/// A fixed-width little-endian integer at a fixed position in a byte buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// position of the least significant byte
    pub offset: usize,
    /// width in bytes, at most 4
    pub size: usize,
}

impl Field {
    pub const fn new(offset: usize, size: usize) -> Self {
        Field { offset, size }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// write the lowest `field.size` bytes of value, least significant first
///
/// Bits that do not fit into the field are cut off.
pub fn write_little_endian(bytes: &mut [u8], field: Field, value: u32) {
    let mut value = value;
    for byte in &mut bytes[field.offset..field.end()] {
        *byte = (value & 0xFF) as u8;
        value >>= 8;
    }
}

pub fn read_little_endian(bytes: &[u8], field: Field) -> u32 {
    bytes[field.offset..field.end()]
        .iter()
        .rev()
        .fold(0_u32, |acc, byte| (acc << 8) | *byte as u32)
}

pub fn read_little_endian_signed(bytes: &[u8], field: Field) -> i32 {
    read_little_endian(bytes, field) as i32
}

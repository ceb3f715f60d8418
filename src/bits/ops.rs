/// Number of bytes needed to hold `bit_len` bits.
///
/// # Examples
/// ```
/// use bitmap::bits::byte_len;
///
/// assert_eq!(byte_len(7), 1);
/// assert_eq!(byte_len(10), 2);
/// assert_eq!(byte_len(0), 0);
/// ```
#[inline]
pub const fn byte_len(bit_len: usize) -> usize {
    bit_len.div_ceil(8)
}

/// Allocates a zeroed byte buffer large enough for `bit_len` bits.
///
/// The usable length in bits may be up to 7 bits larger than requested.
pub fn new_bytes(bit_len: usize) -> Vec<u8> {
    vec![0u8; byte_len(bit_len)]
}

/// Length in bits of `bytes`. Always a multiple of 8.
#[inline]
pub fn bit_len(bytes: &[u8]) -> usize {
    bytes.len() * 8
}

/// Returns the value of bit `index` in `bytes`.
///
/// # Panics
///
/// Panics if `index / 8 >= bytes.len()`.
#[inline]
pub fn get(bytes: &[u8], index: usize) -> bool {
    get_bit(bytes[index / 8], index % 8)
}

/// Sets bit `index` in `bytes` to `value`.
///
/// # Panics
///
/// Panics if `index / 8 >= bytes.len()`.
#[inline]
pub fn set(bytes: &mut [u8], index: usize, value: bool) {
    set_bit(&mut bytes[index / 8], index % 8, value)
}

/// Returns bit `bit` (in `0..8`) of `byte`.
#[inline]
pub const fn get_bit(byte: u8, bit: usize) -> bool {
    byte & (1u8 << bit) != 0
}

/// Returns `byte` with bit `bit` (in `0..8`) replaced by `value`.
#[inline]
pub const fn with_bit(byte: u8, bit: usize, value: bool) -> u8 {
    if value {
        byte | (1u8 << bit)
    } else {
        byte & !(1u8 << bit)
    }
}

/// Replaces bit `bit` (in `0..8`) of `*byte` with `value`.
#[inline]
pub fn set_bit(byte: &mut u8, bit: usize, value: bool) {
    *byte = with_bit(*byte, bit, value)
}

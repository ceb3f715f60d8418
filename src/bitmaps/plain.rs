use crate::bitmaps::{Bitmap, ByteData};
use crate::bits;

/// A bitmap over owned bytes with no synchronization.
///
/// This is the baseline every other variant matches for sequential use.
///
/// # Examples
///
/// ```
/// use bitmap::bitmaps::PlainBitmap;
///
/// let mut bm = PlainBitmap::new(50);
/// bm.set(30, true);
/// assert!(bm.get(30));
/// assert_eq!(bm.len(), 56);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PlainBitmap {
    bytes: Vec<u8>,
}

impl PlainBitmap {
    /// Constructs a zeroed bitmap holding at least `bit_len` bits.
    pub fn new(bit_len: usize) -> Self {
        PlainBitmap {
            bytes: bits::new_bytes(bit_len),
        }
    }

    /// Takes ownership of existing bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        PlainBitmap { bytes }
    }

    /// Returns bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        bits::get(&self.bytes, index)
    }

    /// Sets bit `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        bits::set(&mut self.bytes, index, value)
    }

    /// Length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        bits::bit_len(&self.bytes)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The backing bytes: the live storage if `copy` is false, an independent
    /// copy otherwise.
    ///
    /// Borrows mutably either way; [`PlainBitmap::to_bytes`] takes a copy
    /// through a shared reference.
    pub fn data(&mut self, copy: bool) -> ByteData<'_> {
        if copy {
            ByteData::Copy(self.bytes.clone())
        } else {
            ByteData::Alias(&mut self.bytes)
        }
    }

    /// Copy of the current bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Bitmap for PlainBitmap {
    fn get(&self, index: usize) -> bool {
        PlainBitmap::get(self, index)
    }

    fn set(&mut self, index: usize, value: bool) {
        PlainBitmap::set(self, index, value)
    }

    fn len(&self) -> usize {
        PlainBitmap::len(self)
    }
}

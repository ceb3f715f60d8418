use std::ops::{Deref, DerefMut};

/// Bytes exported from a [`PlainBitmap`](super::PlainBitmap).
///
/// Either a live view of the bitmap's storage or an independent copy, and the
/// variant says which: writes through `Alias` show up in the bitmap, writes
/// to `Copy` never do.
#[derive(Debug, PartialEq, Eq)]
pub enum ByteData<'a> {
    Alias(&'a mut [u8]),
    Copy(Vec<u8>),
}

impl ByteData<'_> {
    pub fn is_alias(&self) -> bool {
        matches!(self, ByteData::Alias(_))
    }

    /// Owned bytes, copying if this is an alias.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            ByteData::Alias(bytes) => bytes.to_vec(),
            ByteData::Copy(bytes) => bytes,
        }
    }
}

impl Deref for ByteData<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            ByteData::Alias(bytes) => bytes,
            ByteData::Copy(bytes) => bytes,
        }
    }
}

impl DerefMut for ByteData<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            ByteData::Alias(bytes) => bytes,
            ByteData::Copy(bytes) => bytes,
        }
    }
}

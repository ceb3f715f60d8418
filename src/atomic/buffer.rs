use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{WORD_BYTES, Window, load_bit, store_bit};
use crate::error::BitmapError;

/// Byte-addressed storage made of shared atomic words.
///
/// Logical byte `k` is byte `k % 4` (little-endian significance) of word
/// `k / 4`, which keeps the `bits` addressing (bit `i` in byte `i / 8`)
/// valid for every byte view handed out by [`AtomicBuffer::to_vec`].
///
/// The true capacity is always a whole number of words and never below
/// [`WORD_BYTES`]. Every constructor enforces this, so any bit of the
/// logical content can be reached through an in-bounds [`Window`].
///
/// Handles are not `Clone`: use [`AtomicBuffer::share`] for an alias and
/// [`AtomicBuffer::deep_copy`] for an independent buffer.
pub struct AtomicBuffer {
    words: Arc<[AtomicU32]>,
    len: usize,
}

impl AtomicBuffer {
    /// Allocates `len` zeroed bytes of content with at least 3 bytes of
    /// padding, rounded up to whole words.
    pub fn zeroed(len: usize) -> Self {
        let words = (len + WORD_BYTES - 1).div_ceil(WORD_BYTES).max(1);
        AtomicBuffer {
            words: (0..words).map(|_| AtomicU32::new(0)).collect(),
            len,
        }
    }

    /// Copies `bytes` into a new buffer with a true capacity of at least
    /// `capacity` bytes.
    ///
    /// Fails if `capacity` cannot host a 4-byte window or cannot hold
    /// `bytes`. No atomic storage is allocated on failure.
    pub fn try_from_bytes(bytes: &[u8], capacity: usize) -> Result<Self, BitmapError> {
        if capacity < WORD_BYTES {
            return Err(BitmapError::InsufficientCapacity { capacity });
        }
        if capacity < bytes.len() {
            return Err(BitmapError::CapacityBelowLength {
                capacity,
                len: bytes.len(),
            });
        }

        let mut words = vec![0u32; capacity.div_ceil(WORD_BYTES)];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks(WORD_BYTES)) {
            let mut le = [0u8; WORD_BYTES];
            le[..chunk.len()].copy_from_slice(chunk);
            *word = u32::from_le_bytes(le);
        }

        Ok(AtomicBuffer {
            words: words.into_iter().map(AtomicU32::new).collect(),
            len: bytes.len(),
        })
    }

    /// Length of the logical content in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True capacity in bytes, padding included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BYTES
    }

    /// The backing words, for use with the `[AtomicU32]` functions.
    #[inline]
    pub fn words(&self) -> &[AtomicU32] {
        &self.words
    }

    /// Atomically reads bit `index` through its window.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        let w = Window::locate(index, self.words.len());
        load_bit(&self.words[w.word()], w.offset(), w.bit())
    }

    /// Atomically writes bit `index` through its window, leaving every other
    /// bit of the window untouched.
    #[inline]
    pub fn set(&self, index: usize, value: bool) {
        let w = Window::locate(index, self.words.len());
        store_bit(&self.words[w.word()], w.offset(), w.bit(), value)
    }

    /// Copies the logical content out, one atomic word load at a time.
    ///
    /// Words written concurrently may be observed before or after the write;
    /// there is no snapshot across words.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.words.len() * WORD_BYTES);
        for word in self.words.iter() {
            out.extend_from_slice(&word.load(Ordering::Acquire).to_le_bytes());
        }
        out.truncate(self.len);
        out
    }

    /// Another handle on the same words. Writes through either are visible
    /// through both.
    pub fn share(&self) -> Self {
        AtomicBuffer {
            words: Arc::clone(&self.words),
            len: self.len,
        }
    }

    /// An independent buffer with the same content and capacity.
    pub fn deep_copy(&self) -> Self {
        AtomicBuffer {
            words: self
                .words
                .iter()
                .map(|w| AtomicU32::new(w.load(Ordering::Acquire)))
                .collect(),
            len: self.len,
        }
    }
}

impl fmt::Debug for AtomicBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("bytes", &self.to_vec())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_pads_at_least_three_bytes() {
        for len in 0..40 {
            let buffer = AtomicBuffer::zeroed(len);
            assert_eq!(buffer.len(), len);
            assert!(buffer.capacity() >= len + 3, "len {len}");
            assert!(buffer.capacity() >= WORD_BYTES);
            assert_eq!(buffer.capacity() % WORD_BYTES, 0);
            assert!(buffer.to_vec().iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn zeroed_two_bytes_rounds_to_two_words() {
        let buffer = AtomicBuffer::zeroed(2);
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.words().len(), 2);
    }

    #[test]
    fn try_from_bytes_rejects_small_capacity() {
        for capacity in 0..WORD_BYTES {
            let err = AtomicBuffer::try_from_bytes(&[], capacity).unwrap_err();
            assert_eq!(err, BitmapError::InsufficientCapacity { capacity });
        }
    }

    #[test]
    fn try_from_bytes_rejects_capacity_below_length() {
        let err = AtomicBuffer::try_from_bytes(&[0; 6], 5).unwrap_err();
        assert_eq!(err, BitmapError::CapacityBelowLength { capacity: 5, len: 6 });
    }

    #[test]
    fn try_from_bytes_round_trips_content() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7];
        let buffer = AtomicBuffer::try_from_bytes(&bytes, 7).unwrap();
        assert_eq!(buffer.len(), 7);
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.to_vec(), bytes);
        assert_eq!(buffer.words()[0].load(Ordering::Relaxed), 0x0403_0201);
    }

    #[test]
    fn bits_follow_byte_addressing() {
        let buffer = AtomicBuffer::zeroed(5);
        buffer.set(10, true);
        buffer.set(39, true);
        assert_eq!(buffer.to_vec(), vec![0, 0b100, 0, 0, 0b1000_0000]);
        assert!(buffer.get(10));
        assert!(buffer.get(39));
        assert!(!buffer.get(11));
    }

    #[test]
    fn share_aliases_and_deep_copy_does_not() {
        let buffer = AtomicBuffer::zeroed(4);
        let alias = buffer.share();
        let copy = buffer.deep_copy();

        alias.set(3, true);
        assert!(buffer.get(3));
        assert!(!copy.get(3));

        copy.set(5, true);
        assert!(!buffer.get(5));

        assert!(Arc::ptr_eq(&alias.words, &buffer.words));
        assert!(!Arc::ptr_eq(&copy.words, &buffer.words));
        assert_eq!(copy.capacity(), buffer.capacity());
    }

    #[test]
    fn debug_shows_content() {
        let buffer = AtomicBuffer::try_from_bytes(&[1, 2], 4).unwrap();
        assert_eq!(
            format!("{buffer:?}"),
            "AtomicBuffer { len: 2, capacity: 4, bytes: [1, 2] }"
        );
    }
}

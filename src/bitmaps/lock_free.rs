use tracing::{debug, error};

use crate::atomic::{AtomicBuffer, WORD_BYTES};
use crate::bitmaps::{Bitmap, SyncBitmap};
use crate::bits;
use crate::error::BitmapError;

/// A bitmap whose single-bit writes are lock-free.
///
/// Storage is a shared [`AtomicBuffer`]. A write to bit `i` picks the aligned
/// 4-byte window holding byte `i / 8` and runs a compare-and-swap loop on it
/// that replaces only the targeted bit. Reads atomically load the same
/// window, so they are linearizable with concurrent writes.
///
/// Writes to the same word are totally ordered by the success order of their
/// CAS. Writes to different words are independent. The loop guarantees that
/// some writer always makes progress, not that a given writer finishes within
/// a bounded number of retries.
///
/// The buffer always has a capacity of at least [`WORD_BYTES`] bytes and at
/// least 3 bytes of padding past the content when built with
/// [`LockFreeBitmap::new`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use bitmap::bitmaps::LockFreeBitmap;
///
/// let bm = Arc::new(LockFreeBitmap::new(64));
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let bm = Arc::clone(&bm);
///         thread::spawn(move || bm.set(t, true))
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert!((0..4).all(|i| bm.get(i)));
/// ```
#[derive(Debug)]
pub struct LockFreeBitmap {
    buffer: AtomicBuffer,
}

impl LockFreeBitmap {
    /// Constructs a zeroed bitmap holding at least `bit_len` bits.
    pub fn new(bit_len: usize) -> Self {
        let buffer = AtomicBuffer::zeroed(bits::byte_len(bit_len));
        debug!(
            bit_len,
            bytes = buffer.len(),
            capacity = buffer.capacity(),
            "allocated lock-free bitmap"
        );
        LockFreeBitmap { buffer }
    }

    /// Builds a bitmap over a copy of `bytes` with a true capacity of at
    /// least `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 4` (no atomic window fits) or if `capacity` is
    /// smaller than `bytes`. See [`LockFreeBitmap::try_from_bytes`].
    pub fn from_bytes(bytes: &[u8], capacity: usize) -> Self {
        match Self::try_from_bytes(bytes, capacity) {
            Ok(bm) => bm,
            Err(err) => {
                error!(%err, "refusing to build lock-free bitmap");
                panic!("{err}");
            }
        }
    }

    /// Fallible form of [`LockFreeBitmap::from_bytes`].
    ///
    /// # Examples
    /// ```
    /// use bitmap::BitmapError;
    /// use bitmap::bitmaps::LockFreeBitmap;
    ///
    /// let err = LockFreeBitmap::try_from_bytes(&[0, 0], 3).unwrap_err();
    /// assert_eq!(err, BitmapError::InsufficientCapacity { capacity: 3 });
    ///
    /// let bm = LockFreeBitmap::try_from_bytes(&[0, 0], 5).unwrap();
    /// assert_eq!(bm.len(), 16);
    /// ```
    pub fn try_from_bytes(bytes: &[u8], capacity: usize) -> Result<Self, BitmapError> {
        let buffer = AtomicBuffer::try_from_bytes(bytes, capacity)?;
        debug!(
            bytes = buffer.len(),
            capacity = buffer.capacity(),
            "wrapped bytes in lock-free bitmap"
        );
        Ok(LockFreeBitmap { buffer })
    }

    /// Wraps an existing buffer without copying it.
    pub fn from_data(buffer: AtomicBuffer) -> Self {
        debug_assert!(buffer.capacity() >= WORD_BYTES);
        LockFreeBitmap { buffer }
    }

    /// Atomically reads bit `index`.
    ///
    /// `index < len()` is a precondition, checked only in debug builds.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len(), "bit index {index} out of range");
        self.buffer.get(index)
    }

    /// Atomically sets bit `index` to `value`, leaving every other bit of its
    /// word as it is.
    ///
    /// Returns without writing if the bit already holds `value`.
    /// `index < len()` is a precondition, checked only in debug builds.
    #[inline]
    pub fn set(&self, index: usize, value: bool) {
        debug_assert!(index < self.len(), "bit index {index} out of range");
        self.buffer.set(index, value)
    }

    /// Length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len() * 8
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True capacity of the backing buffer in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The backing buffer: shared with this bitmap if `copy` is false, an
    /// independent copy otherwise.
    pub fn data(&self, copy: bool) -> AtomicBuffer {
        if copy {
            self.buffer.deep_copy()
        } else {
            self.buffer.share()
        }
    }

    /// Copy of the current bytes, loaded one word at a time.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }
}

impl Bitmap for LockFreeBitmap {
    fn get(&self, index: usize) -> bool {
        LockFreeBitmap::get(self, index)
    }

    fn set(&mut self, index: usize, value: bool) {
        LockFreeBitmap::set(self, index, value)
    }

    fn len(&self) -> usize {
        LockFreeBitmap::len(self)
    }
}

impl SyncBitmap for LockFreeBitmap {
    fn get(&self, index: usize) -> bool {
        LockFreeBitmap::get(self, index)
    }

    fn set(&self, index: usize, value: bool) {
        LockFreeBitmap::set(self, index, value)
    }

    fn len(&self) -> usize {
        LockFreeBitmap::len(self)
    }
}

use super::WORD_BYTES;

/// A 4-byte atomic window over a byte-addressed buffer, chosen for one bit.
///
/// The window always coincides with exactly one atomic word: its first byte
/// is a multiple of [`WORD_BYTES`] and it never extends past the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: usize,
    offset: usize,
    bit: usize,
}

impl Window {
    /// Picks the window hosting bit `index` in a buffer of `words` atomic
    /// words.
    ///
    /// The candidate window starts at the target byte rounded down to a word
    /// boundary. If it would run past the last word it is shifted backward so
    /// its last byte is the last byte of capacity.
    ///
    /// The target byte must lie inside the buffer and `words` must be at
    /// least 1; neither is checked here.
    ///
    /// # Examples
    /// ```
    /// use bitmap::atomic::Window;
    ///
    /// let w = Window::locate(45, 2);
    /// assert_eq!((w.start(), w.offset(), w.bit(), w.word()), (4, 1, 5, 1));
    /// ```
    #[inline]
    pub fn locate(index: usize, words: usize) -> Self {
        debug_assert!(words > 0);

        let capacity = words * WORD_BYTES;
        let byte = index / 8;
        let mut start = byte - byte % WORD_BYTES;
        if start + WORD_BYTES > capacity {
            start -= start + WORD_BYTES - capacity;
        }

        debug_assert!(byte >= start && byte - start < WORD_BYTES);
        Window {
            start,
            offset: byte - start,
            bit: index % 8,
        }
    }

    /// Byte index of the first byte of the window.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Position of the target byte inside the window, in `0..4`.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Position of the target bit inside its byte, in `0..8`.
    #[inline]
    pub fn bit(&self) -> usize {
        self.bit
    }

    /// Index of the atomic word backing this window.
    #[inline]
    pub fn word(&self) -> usize {
        self.start / WORD_BYTES
    }
}

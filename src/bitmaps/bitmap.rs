/// Single-bit access shared by every bitmap variant.
///
/// Indices are not validated: `index < len()` is a caller precondition.
pub trait Bitmap {
    fn get(&self, index: usize) -> bool;
    fn set(&mut self, index: usize, value: bool);

    /// Length in bits, always a multiple of 8.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bitmaps whose writes only need a shared reference, so a single instance
/// can be handed to many threads.
pub trait SyncBitmap: Send + Sync {
    fn get(&self, index: usize) -> bool;
    fn set(&self, index: usize, value: bool);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

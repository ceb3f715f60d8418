use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::bitmaps::{Bitmap, PlainBitmap, SyncBitmap};

/// Storage handle shared between [`GuardedBitmap`]s.
pub type SharedBitmap = Arc<RwLock<PlainBitmap>>;

/// A [`PlainBitmap`] behind a shared/exclusive lock.
///
/// Reads take the shared side and never block each other; writes take the
/// exclusive side. Atomicity is per call, nothing finer.
///
/// # Examples
///
/// ```
/// use bitmap::bitmaps::GuardedBitmap;
///
/// let bm = GuardedBitmap::new(50);
/// bm.set(30, true);
///
/// let other = GuardedBitmap::from_data(bm.data(false), false);
/// other.set(30, false);
/// assert!(!bm.get(30));
/// ```
#[derive(Debug)]
pub struct GuardedBitmap {
    inner: SharedBitmap,
}

impl GuardedBitmap {
    pub fn new(bit_len: usize) -> Self {
        GuardedBitmap {
            inner: Arc::new(RwLock::new(PlainBitmap::new(bit_len))),
        }
    }

    /// Wraps existing storage: shares it when `copy` is false, works on a
    /// snapshot of it otherwise.
    pub fn from_data(data: SharedBitmap, copy: bool) -> Self {
        GuardedBitmap {
            inner: if copy { snapshot(&data) } else { data },
        }
    }

    /// Returns bit `index` under the shared lock.
    pub fn get(&self, index: usize) -> bool {
        self.read().get(index)
    }

    /// Sets bit `index` under the exclusive lock.
    pub fn set(&self, index: usize, value: bool) {
        self.write().set(index, value)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// The backing storage: the live handle if `copy` is false, an
    /// independent copy otherwise.
    pub fn data(&self, copy: bool) -> SharedBitmap {
        if copy {
            snapshot(&self.inner)
        } else {
            Arc::clone(&self.inner)
        }
    }

    /// Copy of the current bytes, taken under the shared lock.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.read().as_bytes().to_vec()
    }

    // A panic while holding the lock cannot tear a single-bit write, so the
    // poisoned state is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, PlainBitmap> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PlainBitmap> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn snapshot(data: &SharedBitmap) -> SharedBitmap {
    let copy = data.read().unwrap_or_else(PoisonError::into_inner).clone();
    Arc::new(RwLock::new(copy))
}

impl Bitmap for GuardedBitmap {
    fn get(&self, index: usize) -> bool {
        GuardedBitmap::get(self, index)
    }

    fn set(&mut self, index: usize, value: bool) {
        GuardedBitmap::set(self, index, value)
    }

    fn len(&self) -> usize {
        GuardedBitmap::len(self)
    }
}

impl SyncBitmap for GuardedBitmap {
    fn get(&self, index: usize) -> bool {
        GuardedBitmap::get(self, index)
    }

    fn set(&self, index: usize, value: bool) {
        GuardedBitmap::set(self, index, value)
    }

    fn len(&self) -> usize {
        GuardedBitmap::len(self)
    }
}

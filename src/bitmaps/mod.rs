//! Bitmap wrappers with three concurrency strategies.
//!
//! All of them agree with the `bits` addressing for sequential use:
//!
//! - [`PlainBitmap`]: owned bytes, no synchronization
//! - [`GuardedBitmap`]: a [`PlainBitmap`] behind a shared/exclusive lock
//! - [`LockFreeBitmap`]: atomic words, single-bit writes via a CAS loop

mod bitmap;
mod byte_data;
mod guarded;
mod lock_free;
mod plain;

pub use bitmap::*;
pub use byte_data::*;
pub use guarded::*;
pub use lock_free::*;
pub use plain::*;

//! Bit-indexed boolean arrays with three concurrency strategies.
//!
//! - [`bitmaps::PlainBitmap`]: no synchronization
//! - [`bitmaps::GuardedBitmap`]: reader/writer lock
//! - [`bitmaps::LockFreeBitmap`]: compare-and-swap on 4-byte atomic words
//!
//! Bit `i` always lives in byte `i / 8` at position `i % 8`, see [`bits`].
//! Bit indices are never range-checked in release builds; staying below
//! `len()` is the caller's job.

pub mod atomic;
pub mod bitmaps;
pub mod bits;
mod error;
pub mod statistics;

pub use error::BitmapError;

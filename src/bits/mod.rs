//! Unsynchronized bit primitives over byte buffers.
//!
//! These functions define the canonical addressing used by every bitmap in
//! this crate: bit `i` lives in byte `i / 8`, at sub-position `i % 8`
//! (least significant bit first).
//!
//! None of them check bounds beyond what slice indexing already does.

mod ops;

pub use ops::*;

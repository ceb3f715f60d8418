//! Lock-free building blocks shared by the atomic bitmap.
//!
//! - `words`: the CAS retry loop and the word-native `[AtomicU32]` path
//! - `window`: mapping a bit index onto an aligned 4-byte atomic window
//! - `buffer`: the reference-counted atomic word storage

mod buffer;
mod window;
mod words;

pub use buffer::*;
pub use window::*;
pub use words::*;

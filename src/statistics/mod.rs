//! Operation counters for benchmark jobs.
//!
//! Each worker thread keeps its own [`Stats`] and the job merges them once all
//! workers have joined, so counting never adds contention to the bitmap under
//! test.

mod stats;
pub use stats::*;

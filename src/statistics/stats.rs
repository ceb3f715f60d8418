use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    reads: usize,
    writes: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            reads: 0,
            writes: 0,
        }
    }

    /// Record into the statistics object that a bit was read
    pub fn bump_reads(&mut self) {
        self.reads += 1
    }

    /// Record into the statistics object that a bit was written
    pub fn bump_writes(&mut self) {
        self.writes += 1
    }

    pub fn get_reads(&self) -> usize {
        self.reads
    }

    pub fn get_writes(&self) -> usize {
        self.writes
    }

    pub fn get_total_ops(&self) -> usize {
        self.reads + self.writes
    }

    /// Combine the counters of two workers
    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            reads: self.reads + other.reads,
            writes: self.writes + other.writes,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}

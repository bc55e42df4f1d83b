//! Monotonic identifier allocation.
//!
//! Each store owns one sequence.  Identifiers are never derived from the
//! collection length, so deleting a record cannot cause a later create to
//! reuse its identifier.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Start past the largest identifier already in use.  Non-numeric
    /// identifiers are ignored.
    pub fn resume(in_use: impl IntoIterator<Item = Option<u64>>) -> Self {
        let max = in_use.into_iter().flatten().max().unwrap_or(0);
        Self { next: max + 1 }
    }

    /// Allocate the next value.
    pub fn allocate(&mut self) -> u64 {
        let n = self.next;
        self.next += 1;
        n
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

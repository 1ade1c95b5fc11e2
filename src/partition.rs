//! Row-band domain decomposition.

use std::ops::Range;

/// Contiguous row range owned by one worker.
///
/// Bands are derived from `(rank, worker_count, total_rows)` and never
/// stored in the grid itself. An empty band (more workers than rows)
/// means "no rows owned" and is a legal no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    start: usize,
    count: usize,
}

impl Band {
    /// Computes the band for `rank` out of `worker_count` over `total_rows`.
    ///
    /// Each rank takes `total_rows / worker_count` rows; the last rank
    /// absorbs the remainder. The resulting bands are pairwise disjoint
    /// and cover every row exactly once.
    pub fn partition(rank: usize, worker_count: usize, total_rows: usize) -> Band {
        debug_assert!(worker_count > 0 && rank < worker_count);
        let per_rank = total_rows / worker_count;
        let start = rank * per_rank;
        let count = if rank == worker_count - 1 {
            total_rows - start
        } else {
            per_rank
        };
        Band { start, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// First owned row. Meaningless when the band is empty.
    pub fn start_row(&self) -> usize {
        self.start
    }

    /// Last owned row (inclusive).
    ///
    /// # Panics
    /// Panics on an empty band; callers check `is_empty` first.
    pub fn end_row(&self) -> usize {
        assert!(!self.is_empty(), "empty band has no end row");
        self.start + self.count - 1
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.start + self.count
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows().contains(&row)
    }
}

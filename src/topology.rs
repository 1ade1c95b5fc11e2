//! Process topology, fixed for the lifetime of a run.

/// Rank and worker count, passed explicitly into every component that
/// needs them rather than read from ambient global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    rank: usize,
    size: usize,
}

impl Topology {
    /// # Panics
    /// Panics if `rank >= size` or `size == 0`; topology comes from the
    /// transport layer, which never hands out an invalid pair.
    pub fn new(rank: usize, size: usize) -> Topology {
        assert!(size > 0, "worker count must be positive");
        assert!(rank < size, "rank {} out of range for {} workers", rank, size);
        Topology { rank, size }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_root(&self) -> bool {
        self.rank == 0
    }

    /// Row-neighbor above, if any: rank 0 has none.
    pub fn up(&self) -> Option<usize> {
        self.rank.checked_sub(1)
    }

    /// Row-neighbor below, if any: the last rank has none.
    pub fn down(&self) -> Option<usize> {
        if self.rank + 1 < self.size {
            Some(self.rank + 1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_ranks_have_one_neighbor() {
        let first = Topology::new(0, 4);
        assert_eq!(first.up(), None);
        assert_eq!(first.down(), Some(1));

        let last = Topology::new(3, 4);
        assert_eq!(last.up(), Some(2));
        assert_eq!(last.down(), None);
    }

    #[test]
    fn singleton_has_no_neighbors() {
        let only = Topology::new(0, 1);
        assert_eq!(only.up(), None);
        assert_eq!(only.down(), None);
        assert!(only.is_root());
    }
}

//! Source partitioning across a fixed worker group.
//!
//! Worker `r` of `w` owns the contiguous interval
//! `[r * (n / w), (r + 1) * (n / w))`. The `n % w` leftover sources are the
//! highest node indices, handed out one each in reverse index order: worker
//! `r < n % w` additionally solves source `n - r - 1`. The pairing
//! `rank <-> n - rank - 1` is a contract with the collector, which writes
//! the gathered remainder block back in descending node order.

/// One worker's share of the sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub start: usize,
    pub end: usize,
    pub remainder_source: Option<usize>,
}

impl Assignment {
    /// Interval sources first, then the remainder source, matching the
    /// order a worker solves them in.
    pub fn sources(&self) -> impl Iterator<Item = usize> + '_ {
        (self.start..self.end).chain(self.remainder_source)
    }

    pub fn interval_len(&self) -> usize {
        self.end - self.start
    }
}

pub fn interval_len(num_sources: usize, num_workers: usize) -> usize {
    num_sources / num_workers
}

pub fn remainder(num_sources: usize, num_workers: usize) -> usize {
    num_sources % num_workers
}

pub fn assign(num_sources: usize, num_workers: usize, rank: usize) -> Assignment {
    assert!(num_workers > 0, "worker group cannot be empty");
    assert!(rank < num_workers, "rank {rank} out of {num_workers} workers");
    let interval = interval_len(num_sources, num_workers);
    let start = rank * interval;
    let remainder_source = if rank < remainder(num_sources, num_workers) {
        Some(num_sources - rank - 1)
    } else {
        None
    };
    Assignment {
        start,
        end: start + interval,
        remainder_source,
    }
}

//! Merging per-worker rows into the final matrix ordering.
//!
//! Interval blocks land at `[rank * (n / w) ..]` in rank order, filling rows
//! `[0, n - n % w)`. The remainder row gathered from rank `r` is written in
//! descending node order, i.e. at row `n - 1 - r` -- the mirror image of the
//! partitioner handing rank `r` source `n - r - 1`. The two rules compose to
//! plain source order, which is what the output writer assumes.

use crate::engine::{self, SolveCtx};
use crate::graph::Graph;
use crate::matrix::{DistanceMatrix, UNREACHED};
use crate::partition;

#[derive(Debug)]
pub struct ResultCollector {
    matrix: DistanceMatrix,
    interval: usize,
    num_sources: usize,
}

impl ResultCollector {
    pub fn new(num_sources: usize, num_workers: usize) -> ResultCollector {
        ResultCollector {
            matrix: DistanceMatrix::new(num_sources, num_sources),
            interval: partition::interval_len(num_sources, num_workers),
            num_sources,
        }
    }

    /// Accept a worker's contiguous block of interval rows.
    pub fn place_interval(&mut self, rank: usize, rows: &[Vec<f64>]) {
        assert_eq!(
            rows.len(),
            self.interval,
            "rank {rank} sent a block of {} rows, expected {}",
            rows.len(),
            self.interval
        );
        let start = rank * self.interval;
        for (i, row) in rows.iter().enumerate() {
            self.matrix.set_row(start + i, row);
        }
    }

    /// Accept the single remainder row an eligible worker computed.
    pub fn place_remainder(&mut self, rank: usize, row: &[f64]) {
        self.matrix.set_row(self.num_sources - 1 - rank, row);
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> DistanceMatrix {
        self.matrix
    }
}

/// Run the full computation as `num_workers` sequential workers and merge
/// their rows through the collector. Partitioning never changes the result,
/// so this must equal [`engine::solve_all`] for any worker count; the
/// distributed binary is this loop unrolled across PEs.
pub fn solve_partitioned(graph: &Graph, delta: f64, num_workers: usize) -> DistanceMatrix {
    let n = graph.num_nodes();
    let mut collector = ResultCollector::new(n, num_workers);
    for rank in 0..num_workers {
        let assignment = partition::assign(n, num_workers, rank);
        let mut ctx = SolveCtx::new();
        let mut rows = Vec::with_capacity(assignment.interval_len());
        for source in assignment.start..assignment.end {
            let mut row = vec![UNREACHED; n];
            engine::solve(graph, delta, source, &mut ctx, &mut row);
            rows.push(row);
        }
        collector.place_interval(rank, &rows);
        if let Some(source) = assignment.remainder_source {
            let mut row = vec![UNREACHED; n];
            engine::solve(graph, delta, source, &mut ctx, &mut row);
            collector.place_remainder(rank, &row);
        }
    }
    collector.into_matrix()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_blocks_land_in_rank_order() {
        // 4 sources, 2 workers, no remainder.
        let mut collector = ResultCollector::new(4, 2);
        collector.place_interval(0, &[vec![0.0; 4], vec![1.0; 4]]);
        collector.place_interval(1, &[vec![2.0; 4], vec![3.0; 4]]);
        let matrix = collector.into_matrix();
        for r in 0..4 {
            assert_eq!(matrix.row(r), &[r as f64; 4][..]);
        }
    }

    #[test]
    fn remainder_rows_fill_the_tail_in_descending_node_order() {
        // 5 sources, 3 workers: interval 1, remainder 2. Rank 0 solved
        // source 4, rank 1 solved source 3.
        let mut collector = ResultCollector::new(5, 3);
        collector.place_interval(0, &[vec![0.0; 5]]);
        collector.place_interval(1, &[vec![1.0; 5]]);
        collector.place_interval(2, &[vec![2.0; 5]]);
        collector.place_remainder(0, &[4.0; 5]);
        collector.place_remainder(1, &[3.0; 5]);
        let matrix = collector.into_matrix();
        for r in 0..5 {
            assert_eq!(matrix.row(r), &[r as f64; 5][..], "row {r}");
        }
    }

    #[test]
    #[should_panic(expected = "expected")]
    fn wrong_block_size_is_a_contract_violation() {
        ResultCollector::new(4, 2).place_interval(0, &[vec![0.0; 4]]);
    }

    #[test]
    fn partitioned_solve_matches_single_worker() {
        let graph = Graph::from_edges(
            4,
            &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 5.0), (2, 3, 1.0)],
        )
        .unwrap();
        let baseline = engine::solve_all(&graph, 1.0);
        for workers in [1, 2, 3, 4, 7] {
            assert_eq!(
                solve_partitioned(&graph, 1.0, workers),
                baseline,
                "{workers} workers"
            );
        }
    }
}

//! Delta-stepping single-source shortest-path solver.
//!
//! Nodes are grouped into levels by `floor(tentative_distance / delta)`.
//! The lowest active level is expanded repeatedly: light edges (weight <=
//! delta) may re-populate the same level and are relaxed first; heavy edges
//! always target a strictly higher level and are relaxed only once no light
//! candidate is pending. Non-negative weights guarantee every newly computed
//! level is >= the level being processed, which is the termination argument.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::Graph;
use crate::matrix::{DistanceMatrix, UNREACHED};

/// Per-run scratch state, owned by the caller and handed to [`solve`].
///
/// Replaces what a straight port would keep as globals: the bucket map and
/// the four transient node sets. Reusing one context across sources avoids
/// reallocating; `solve` clears everything on entry so runs stay
/// independent.
#[derive(Debug, Default)]
pub struct SolveCtx {
    /// Level -> nodes currently believed to belong to that level. Entries
    /// are only ever created non-empty and are removed when drained, so the
    /// first key is always the lowest active level.
    buckets: BTreeMap<u64, BTreeSet<u32>>,
    light: BTreeSet<u32>,
    heavy: BTreeSet<u32>,
    visited: BTreeSet<u32>,
    updated: BTreeSet<u32>,
}

impl SolveCtx {
    pub fn new() -> SolveCtx {
        SolveCtx::default()
    }

    fn reset(&mut self) {
        self.buckets.clear();
        self.light.clear();
        self.heavy.clear();
        self.visited.clear();
        self.updated.clear();
    }
}

fn level_of(dist: f64, delta: f64) -> u64 {
    // Truncating division; a distance exactly on a multiple of delta lands
    // in the higher level.
    (dist / delta) as u64
}

/// Fill `row` with the shortest-path distances from `source` to every node.
/// Unreached nodes keep the [`UNREACHED`] sentinel. `delta` must be
/// positive; `row` must have one slot per graph node.
pub fn solve(graph: &Graph, delta: f64, source: usize, ctx: &mut SolveCtx, row: &mut [f64]) {
    let num_nodes = graph.num_nodes();
    assert!(delta > 0.0, "delta must be positive, got {delta}");
    assert_eq!(row.len(), num_nodes, "row length must match the node count");

    ctx.reset();
    row.fill(UNREACHED);
    row[source] = 0.0;
    ctx.buckets.entry(0).or_default().insert(source as u32);

    while let Some(&level) = ctx.buckets.keys().next() {
        // Expand pass over the current level.
        let members: Vec<u32> = ctx.buckets[&level].iter().copied().collect();
        for &u in &members {
            let u = u as usize;
            let base = if row[u] < 0.0 { 0.0 } else { row[u] };
            for j in 0..num_nodes {
                if j == source {
                    continue;
                }
                let Some(w) = graph.weight(u, j) else {
                    continue;
                };
                // Classification is per edge traversal, not per node.
                if w > delta {
                    ctx.heavy.insert(j as u32);
                } else {
                    ctx.light.insert(j as u32);
                }
                let candidate = base + w;
                if row[j] < 0.0 || candidate < row[j] {
                    row[j] = candidate;
                    ctx.updated.insert(j as u32);
                }
            }
        }

        // Everything expanded this pass is done unless its distance improves
        // again, in which case `updated` re-admits it below.
        ctx.visited.extend(members);
        ctx.buckets.remove(&level);

        // Light candidates keep the current level alive; heavy candidates
        // accumulate until a pass produces no light work.
        let relax: Vec<u32> = if !ctx.light.is_empty() {
            let relax = ctx.light.iter().copied().collect();
            ctx.light.clear();
            relax
        } else {
            let relax = ctx.heavy.iter().copied().collect();
            ctx.heavy.clear();
            relax
        };
        for v in relax {
            if !ctx.visited.contains(&v) {
                let l = level_of(row[v as usize], delta);
                ctx.buckets.entry(l).or_default().insert(v);
            }
        }

        // Re-admit improved nodes regardless of visited status so their
        // outgoing edges get relaxed again at the new distance.
        let updated: Vec<u32> = ctx.updated.iter().copied().collect();
        ctx.updated.clear();
        for v in updated {
            let l = level_of(row[v as usize], delta);
            ctx.buckets.entry(l).or_default().insert(v);
        }
    }
}

/// Solve every source sequentially into a fresh matrix. This is what the
/// serial binary runs and the single-worker baseline the partitioned result
/// must match.
pub fn solve_all(graph: &Graph, delta: f64) -> DistanceMatrix {
    let n = graph.num_nodes();
    let mut table = DistanceMatrix::new(n, n);
    let mut ctx = SolveCtx::new();
    for source in 0..n {
        solve(graph, delta, source, &mut ctx, table.row_mut(source));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_graph() -> Graph {
        Graph::from_edges(
            4,
            &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 5.0), (2, 3, 1.0)],
        )
        .unwrap()
    }

    fn solve_row(graph: &Graph, delta: f64, source: usize) -> Vec<f64> {
        let mut ctx = SolveCtx::new();
        let mut row = vec![UNREACHED; graph.num_nodes()];
        solve(graph, delta, source, &mut ctx, &mut row);
        row
    }

    #[test]
    fn example_row_from_source_zero() {
        let graph = example_graph();
        assert_eq!(solve_row(&graph, 1.0, 0), vec![0.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn delta_does_not_change_distances() {
        let graph = example_graph();
        let base = solve_row(&graph, 1.0, 0);
        for delta in [0.5, 2.0, 3.5, 100.0] {
            assert_eq!(solve_row(&graph, delta, 0), base, "delta {delta}");
        }
    }

    #[test]
    fn shorter_indirect_path_wins_over_direct_edge() {
        // Direct 0-2 edge costs 5, the two-hop path costs 3.
        let graph = example_graph();
        assert_eq!(solve_row(&graph, 1.0, 0)[2], 3.0);
    }

    #[test]
    fn unreachable_nodes_stay_at_the_sentinel() {
        let graph = Graph::from_edges(3, &[(0, 1, 1.0)]).unwrap();
        assert_eq!(solve_row(&graph, 1.0, 0), vec![0.0, 1.0, UNREACHED]);
    }

    #[test]
    fn single_node_graph() {
        let graph = Graph::from_edges(1, &[]).unwrap();
        assert_eq!(solve_row(&graph, 1.0, 0), vec![0.0]);
    }

    #[test]
    fn distances_on_exact_delta_multiples() {
        // Unit weights with delta 1.0 put every finished distance exactly on
        // a level boundary; the truncating division must keep the solve
        // terminating and exact.
        let graph = Graph::from_edges(
            5,
            &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)],
        )
        .unwrap();
        assert_eq!(solve_row(&graph, 1.0, 0), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn heavy_only_graph_progresses() {
        // Every edge is heavy for delta 1, so each level relaxes heavy
        // candidates straight away.
        let graph = Graph::from_edges(3, &[(0, 1, 5.0), (1, 2, 7.0)]).unwrap();
        assert_eq!(solve_row(&graph, 1.0, 0), vec![0.0, 5.0, 12.0]);
    }

    #[test]
    fn visited_node_is_reexpanded_when_its_distance_improves() {
        // Node 1 is expanded at distance 10 through the direct edge, then
        // improved to 2 via 0-2-1; its neighbor 3 must see the improvement.
        let graph = Graph::from_edges(
            4,
            &[(0, 1, 10.0), (0, 2, 1.0), (2, 1, 1.0), (1, 3, 1.0)],
        )
        .unwrap();
        let row = solve_row(&graph, 100.0, 0);
        assert_eq!(row, vec![0.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn context_reuse_does_not_leak_state_between_sources() {
        let graph = example_graph();
        let mut ctx = SolveCtx::new();
        let mut first = vec![UNREACHED; 4];
        solve(&graph, 1.0, 0, &mut ctx, &mut first);
        let mut other = vec![UNREACHED; 4];
        solve(&graph, 1.0, 3, &mut ctx, &mut other);
        let mut again = vec![UNREACHED; 4];
        solve(&graph, 1.0, 0, &mut ctx, &mut again);
        assert_eq!(first, again);
        assert_eq!(other, vec![4.0, 3.0, 1.0, 0.0]);
    }

    #[test]
    fn solve_all_rows_are_symmetric() {
        let graph = example_graph();
        let table = solve_all(&graph, 1.0);
        for s in 0..4 {
            for t in 0..4 {
                assert_eq!(table.get(s, t), table.get(t, s), "({s}, {t})");
            }
        }
    }

    #[test]
    #[should_panic(expected = "delta must be positive")]
    fn zero_delta_is_a_contract_violation() {
        let graph = example_graph();
        solve_row(&graph, 0.0, 0);
    }
}

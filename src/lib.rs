//! All-sources shortest paths on a weighted undirected graph via the
//! delta-stepping algorithm, with the N per-source runs partitioned across a
//! fixed worker group (one PE per worker in the lamellar binary).

pub mod collect;
pub mod engine;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod options;
pub mod output;
pub mod partition;

pub use collect::ResultCollector;
pub use engine::SolveCtx;
pub use error::SsspError;
pub use graph::Graph;
pub use matrix::{DistanceMatrix, UNREACHED};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can terminate a run before or during graph load.
///
/// Configuration problems (bad delta, unopenable files, malformed command
/// line) are reported with a usage hint and stop the program before any
/// computation starts. Format problems are surfaced while parsing the edge
/// list; no partial graph is retained. The solver itself has no recoverable
/// error path: exhausting a bucket or set is a broken contract and panics.
#[derive(Debug, Error)]
pub enum SsspError {
    #[error("delta must be a positive real, got {0}")]
    BadDelta(f64),

    #[error("invalid command line arguments")]
    BadArguments,

    #[error("cannot open input file {path}: {source}")]
    InputFile { path: PathBuf, source: io::Error },

    #[error("cannot create output file {path}: {source}")]
    OutputFile { path: PathBuf, source: io::Error },

    #[error("failed reading edge list: {0}")]
    Read(#[from] io::Error),

    #[error("failed writing distances to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("expected {expected} in edge list, found `{found}`")]
    BadToken {
        expected: &'static str,
        found: String,
    },

    #[error("node id {node} outside 0..{num_nodes}")]
    NodeOutOfRange { node: i64, num_nodes: usize },

    #[error("edge ({i}, {j}) has negative weight {weight}")]
    NegativeWeight { i: usize, j: usize, weight: f64 },

    #[error("edge list ended without the -1 terminator")]
    MissingTerminator,
}

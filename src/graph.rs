use std::io::Read;

use crate::error::SsspError;

/// Sentinel marking the absence of an edge in the weight matrix.
pub const NO_EDGE: f64 = -1.0;

/// Dense symmetric weight matrix over nodes `0..num_nodes`.
///
/// Built once from an edge list and shared read-only afterwards; there is no
/// mutation API past load. Serde derives let the whole graph ride inside the
/// broadcast active message of the distributed binary.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Graph {
    num_nodes: usize,
    weights: Vec<f64>,
}

impl Graph {
    fn with_nodes(num_nodes: usize) -> Graph {
        Graph {
            num_nodes,
            weights: vec![NO_EDGE; num_nodes * num_nodes],
        }
    }

    /// Build a graph from explicit edges, applying the same rules as the
    /// file parser: duplicate pairs keep the minimum weight, self-edges are
    /// dropped, both orientations are written.
    pub fn from_edges(
        num_nodes: usize,
        edges: &[(usize, usize, f64)],
    ) -> Result<Graph, SsspError> {
        let mut graph = Graph::with_nodes(num_nodes);
        for &(i, j, w) in edges {
            if i >= num_nodes {
                return Err(SsspError::NodeOutOfRange {
                    node: i as i64,
                    num_nodes,
                });
            }
            if j >= num_nodes {
                return Err(SsspError::NodeOutOfRange {
                    node: j as i64,
                    num_nodes,
                });
            }
            if w < 0.0 {
                return Err(SsspError::NegativeWeight { i, j, weight: w });
            }
            graph.set_edge(i, j, w);
        }
        Ok(graph)
    }

    /// Parse the textual edge-list format: the first token is the node count
    /// N, followed by `i j weight` triples, terminated by `-1` in place of
    /// the next `i`. N <= 0 yields an empty graph (an informational
    /// condition for the caller, not an error).
    pub fn load(mut reader: impl Read) -> Result<Graph, SsspError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Graph::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Graph, SsspError> {
        let mut tokens = text.split_whitespace();

        let num_nodes = match tokens.next() {
            Some(tok) => parse_int(tok)?,
            None => 0,
        };
        if num_nodes <= 0 {
            return Ok(Graph::with_nodes(0));
        }
        let num_nodes = num_nodes as usize;

        let mut graph = Graph::with_nodes(num_nodes);
        loop {
            let i = match tokens.next() {
                Some(tok) => parse_int(tok)?,
                None => return Err(SsspError::MissingTerminator),
            };
            if i == -1 {
                break;
            }
            let j = match tokens.next() {
                Some(tok) => parse_int(tok)?,
                None => return Err(SsspError::MissingTerminator),
            };
            let w = match tokens.next() {
                Some(tok) => parse_real(tok)?,
                None => return Err(SsspError::MissingTerminator),
            };
            let i = check_node(i, num_nodes)?;
            let j = check_node(j, num_nodes)?;
            if w < 0.0 {
                return Err(SsspError::NegativeWeight { i, j, weight: w });
            }
            graph.set_edge(i, j, w);
        }
        Ok(graph)
    }

    // Writes both orientations; parallel edges collapse to the minimum
    // weight, self-edges are discarded.
    fn set_edge(&mut self, i: usize, j: usize, w: f64) {
        if i == j {
            return;
        }
        let cur = self.weights[i * self.num_nodes + j];
        if cur == NO_EDGE || w < cur {
            self.weights[i * self.num_nodes + j] = w;
            self.weights[j * self.num_nodes + i] = w;
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        let w = self.weights[i * self.num_nodes + j];
        if w == NO_EDGE {
            None
        } else {
            Some(w)
        }
    }
}

fn parse_int(tok: &str) -> Result<i64, SsspError> {
    tok.parse().map_err(|_| SsspError::BadToken {
        expected: "an integer",
        found: tok.to_string(),
    })
}

fn parse_real(tok: &str) -> Result<f64, SsspError> {
    tok.parse().map_err(|_| SsspError::BadToken {
        expected: "a real number",
        found: tok.to_string(),
    })
}

fn check_node(node: i64, num_nodes: usize) -> Result<usize, SsspError> {
    if node < 0 || node as usize >= num_nodes {
        Err(SsspError::NodeOutOfRange { node, num_nodes })
    } else {
        Ok(node as usize)
    }
}

/// Sentinel for a pair no path has reached yet. It is also what the output
/// format prints for unreached pairs, so rows can be written verbatim.
pub const UNREACHED: f64 = -1.0;

/// Owned row-major distance table. Row `s` holds the distances from source
/// `s` to every node and is written exclusively during that source's solve.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    pub fn new(rows: usize, cols: usize) -> DistanceMatrix {
        DistanceMatrix {
            rows,
            cols,
            data: vec![UNREACHED; rows * cols],
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, r: usize) -> &[f64] {
        assert!(r < self.rows, "row {r} out of bounds ({} rows)", self.rows);
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        assert!(r < self.rows, "row {r} out of bounds ({} rows)", self.rows);
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn set_row(&mut self, r: usize, values: &[f64]) {
        self.row_mut(r).copy_from_slice(values);
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.row(r)[c]
    }
}

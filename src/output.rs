//! Text serialization of the distance matrix: the node count, one line of
//! space-separated distances per source in increasing source order, then a
//! final `-1` line. Unreached pairs print the `-1.000000` sentinel.

use std::io::{self, Write};

use crate::matrix::DistanceMatrix;

pub fn write_distances<W: Write>(out: &mut W, matrix: &DistanceMatrix) -> io::Result<()> {
    writeln!(out, "{}", matrix.num_rows())?;
    for r in 0..matrix.num_rows() {
        for v in matrix.row(r) {
            write!(out, "{v:.6} ")?;
        }
        writeln!(out)?;
    }
    write!(out, "-1")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::UNREACHED;

    #[test]
    fn matches_the_expected_layout() {
        let mut matrix = DistanceMatrix::new(2, 2);
        matrix.set_row(0, &[0.0, 1.5]);
        matrix.set_row(1, &[1.5, UNREACHED]);
        let mut buf = Vec::new();
        write_distances(&mut buf, &matrix).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "2\n0.000000 1.500000 \n1.500000 -1.000000 \n-1"
        );
    }

    #[test]
    fn serialization_is_idempotent() {
        let mut matrix = DistanceMatrix::new(3, 3);
        for r in 0..3 {
            matrix.set_row(r, &[0.25 * r as f64, UNREACHED, 7.0]);
        }
        let mut first = Vec::new();
        write_distances(&mut first, &matrix).unwrap();
        let mut second = Vec::new();
        write_distances(&mut second, &matrix).unwrap();
        assert_eq!(first, second);
    }
}

//! Pure integer vector/matrix operations for the firing equation.
//!
//! The net engine computes `M' = M + W·e_t` from these three functions.
//! They hold no state and are unconditionally thread-safe. All dimension
//! checking happens here so the engine can propagate a structural
//! miscompile as an error instead of indexing out of bounds.

use crate::error::MatrixError;

/// Build the length-`len` unit vector with a `1` at index `t`.
pub fn unit(t: usize, len: usize) -> Result<Vec<i64>, MatrixError> {
    if t >= len {
        return Err(MatrixError::OutOfRange { index: t, len });
    }
    let mut v = vec![0; len];
    v[t] = 1;
    Ok(v)
}

/// Multiply a row-major matrix by a column vector.
///
/// `m` is a slice of fixed-width rows; the column count `C` must equal
/// `v.len()`. Zero entries of `v` are skipped, which makes the common
/// matrix-by-unit-vector product a single column read.
pub fn multiply<const C: usize>(m: &[[i64; C]], v: &[i64]) -> Result<Vec<i64>, MatrixError> {
    if C != v.len() {
        return Err(MatrixError::DimMismatch {
            left: C,
            right: v.len(),
        });
    }
    let mut out = vec![0; m.len()];
    for (j, &x) in v.iter().enumerate() {
        if x == 0 {
            continue;
        }
        for (i, row) in m.iter().enumerate() {
            out[i] += row[j] * x;
        }
    }
    Ok(out)
}

/// Elementwise sum of two vectors of equal length.
pub fn add(a: &[i64], b: &[i64]) -> Result<Vec<i64>, MatrixError> {
    if a.len() != b.len() {
        return Err(MatrixError::DimMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_places_single_one() {
        let v = unit(2, 4).unwrap();
        assert_eq!(v, vec![0, 0, 1, 0]);
    }

    #[test]
    fn unit_rejects_out_of_range() {
        assert_eq!(
            unit(4, 4),
            Err(MatrixError::OutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn multiply_by_unit_selects_column() {
        let m = [[1, -2, 3], [0, 5, -1]];
        let e1 = unit(1, 3).unwrap();
        assert_eq!(multiply(&m, &e1).unwrap(), vec![-2, 5]);
    }

    #[test]
    fn multiply_rejects_dim_mismatch() {
        let m = [[1, 2], [3, 4]];
        assert_eq!(
            multiply(&m, &[1, 0, 0]),
            Err(MatrixError::DimMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn multiply_empty_matrix_is_empty() {
        let m: [[i64; 2]; 0] = [];
        assert_eq!(multiply(&m, &[1, 0]).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn add_elementwise() {
        assert_eq!(add(&[1, -1, 2], &[3, 1, -2]).unwrap(), vec![4, 0, 0]);
    }

    #[test]
    fn add_rejects_dim_mismatch() {
        assert_eq!(
            add(&[1], &[1, 2]),
            Err(MatrixError::DimMismatch { left: 1, right: 2 })
        );
    }
}

use crate::foundation::error::{DetwallError, DetwallResult};

/// Smallest matrix dimension the generator places on the canvas.
pub const MIN_MATRIX_DIM: usize = 2;
/// Largest matrix dimension the generator and the spec validator accept.
pub const MAX_MATRIX_DIM: usize = 5;

/// Dense square matrix stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    pub(super) n: usize,
    pub(super) entries: Vec<f64>,
}

impl Matrix {
    pub fn new(n: usize, entries: Vec<f64>) -> DetwallResult<Self> {
        if n == 0 {
            return Err(DetwallError::invalid_parameter("matrix dimension must be > 0"));
        }
        if entries.len() != n * n {
            return Err(DetwallError::invalid_parameter(format!(
                "matrix of dimension {n} needs {} entries, got {}",
                n * n,
                entries.len()
            )));
        }
        Ok(Self { n, entries })
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> DetwallResult<Self> {
        let n = rows.len();
        let mut entries = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(DetwallError::invalid_parameter(format!(
                    "matrix row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            entries.extend_from_slice(row);
        }
        Self::new(n, entries)
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        self.entries[row * self.n + col]
    }

    pub(crate) fn row(&self, row: usize) -> &[f64] {
        &self.entries[row * self.n..(row + 1) * self.n]
    }

    pub fn entries(&self) -> &[f64] {
        &self.entries
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|r| self.row(r).to_vec()).collect()
    }

    pub fn trace(&self) -> f64 {
        (0..self.n).map(|i| self.get(i, i)).sum()
    }

    pub fn mean_entry(&self) -> f64 {
        self.entries.iter().sum::<f64>() / self.entries.len() as f64
    }

    pub fn is_finite(&self) -> bool {
        self.entries.iter().all(|v| v.is_finite())
    }

    /// Determinant: closed form up to 3x3, LU with partial pivoting above.
    ///
    /// Deterministic for a given matrix, so recomputing on a stored matrix reproduces the
    /// stored value bit-for-bit.
    pub fn determinant(&self) -> f64 {
        let m = &self.entries;
        match self.n {
            1 => m[0],
            2 => m[0] * m[3] - m[1] * m[2],
            3 => {
                m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
                    + m[2] * (m[3] * m[7] - m[4] * m[6])
            }
            _ => lu_determinant(self.n, m),
        }
    }
}

fn lu_determinant(n: usize, src: &[f64]) -> f64 {
    let mut a = src.to_vec();
    let mut det = 1.0f64;

    for col in 0..n {
        let mut pivot = col;
        let mut best = a[col * n + col].abs();
        for r in (col + 1)..n {
            let v = a[r * n + col].abs();
            if v > best {
                best = v;
                pivot = r;
            }
        }
        if best == 0.0 {
            return 0.0;
        }
        if pivot != col {
            for c in 0..n {
                a.swap(col * n + c, pivot * n + c);
            }
            det = -det;
        }

        let p = a[col * n + col];
        det *= p;
        for r in (col + 1)..n {
            let factor = a[r * n + col] / p;
            if factor == 0.0 {
                continue;
            }
            for c in (col + 1)..n {
                a[r * n + c] -= factor * a[col * n + c];
            }
        }
    }

    det
}

#[cfg(test)]
#[path = "../../tests/unit/linalg/matrix.rs"]
mod tests;

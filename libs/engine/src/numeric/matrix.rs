//! Rectangular matrices of values.

use super::compare;
use super::value::Value;
use crate::error::{DomainError, Error, Result};
use crate::ops;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

/// Largest integer power computed by repeated squaring.
const MAX_MATRIX_POWER: u32 = 1 << 16;

/// A `rows × cols` matrix stored row by row. Always rectangular.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<Value>,
}

fn unsupported(message: String) -> Error {
    DomainError::Unsupported(message).into()
}

impl Matrix {
    /// Build from rows, failing on rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(Error::NonRectangularMatrix {
                    row: i + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: if cols == 0 { 0 } else { row_count },
            cols,
            cells,
        })
    }

    pub fn identity(n: usize) -> Self {
        let cells = (0..n * n)
            .map(|k| if k / n == k % n { Value::one() } else { Value::zero() })
            .collect();
        Self {
            rows: n,
            cols: n,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }

    pub fn row(&self, i: usize) -> &[Value] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> &Value {
        &self.cells[row * self.cols + col]
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn shape(&self) -> String {
        format!("{}×{}", self.rows, self.cols)
    }

    pub fn try_map(&self, f: impl FnMut(&Value) -> Result<Value>) -> Result<Self> {
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect::<Result<_>>()?,
        })
    }

    /// Elementwise sum; shapes must agree.
    pub fn add(&self, other: &Matrix) -> Result<Self> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(unsupported(format!(
                "cannot add a {} matrix and a {} matrix",
                self.shape(),
                other.shape()
            )));
        }
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| ops::add(a.clone(), b.clone()))
            .collect::<Result<_>>()?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        })
    }

    pub fn neg(&self) -> Result<Self> {
        self.try_map(|cell| ops::neg(cell.clone()))
    }

    /// Every cell times `scalar`, with the scalar on the left when `left`.
    pub fn scale(&self, scalar: &Value, left: bool) -> Result<Self> {
        self.try_map(|cell| {
            if left {
                ops::mul(scalar.clone(), cell.clone())
            } else {
                ops::mul(cell.clone(), scalar.clone())
            }
        })
    }

    pub fn matmul(&self, other: &Matrix) -> Result<Self> {
        if self.cols != other.rows {
            return Err(unsupported(format!(
                "cannot multiply a {} matrix by a {} matrix",
                self.shape(),
                other.shape()
            )));
        }
        let mut cells = Vec::with_capacity(self.rows * other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc = Value::zero();
                for k in 0..self.cols {
                    let term = ops::mul(self.get(i, k).clone(), other.get(k, j).clone())?;
                    acc = ops::add(acc, term)?;
                }
                cells.push(acc);
            }
        }
        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            cells,
        })
    }

    /// Integer power of a square matrix; negative powers invert first.
    pub fn powi(&self, n: &BigInt) -> Result<Self> {
        if !self.is_square() {
            return Err(unsupported(format!(
                "cannot raise a {} matrix to a power",
                self.shape()
            )));
        }
        let mut k = n
            .abs()
            .to_u32()
            .filter(|k| *k <= MAX_MATRIX_POWER)
            .ok_or_else(|| DomainError::Overflow(format!("matrix power {}", n)))?;
        let mut base = if n.is_negative() {
            self.inverse()?
        } else {
            self.clone()
        };
        let mut result = Matrix::identity(self.rows);
        while k > 0 {
            if k & 1 == 1 {
                result = result.matmul(&base)?;
            }
            k >>= 1;
            if k > 0 {
                base = base.matmul(&base)?;
            }
        }
        Ok(result)
    }

    /// Inverse by Gauss-Jordan elimination over exact values.
    pub fn inverse(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(unsupported(format!("a {} matrix has no inverse", self.shape())));
        }
        let n = self.rows;
        let mut left: Vec<Vec<Value>> = (0..n).map(|i| self.row(i).to_vec()).collect();
        let identity = Matrix::identity(n);
        let mut right: Vec<Vec<Value>> = (0..n).map(|i| identity.row(i).to_vec()).collect();

        for col in 0..n {
            let pivot = (col..n)
                .find(|&r| compare::equals(&left[r][col], &Value::zero()) != Some(true))
                .ok_or_else(|| unsupported("matrix is singular".into()))?;
            left.swap(col, pivot);
            right.swap(col, pivot);

            let p = left[col][col].clone();
            for j in 0..n {
                left[col][j] = ops::div(left[col][j].clone(), p.clone())?;
                right[col][j] = ops::div(right[col][j].clone(), p.clone())?;
            }
            for r in 0..n {
                if r == col || left[r][col].is_exact_zero() {
                    continue;
                }
                let factor = left[r][col].clone();
                for j in 0..n {
                    let l = ops::mul(factor.clone(), left[col][j].clone())?;
                    left[r][j] = ops::sub(left[r][j].clone(), l)?;
                    let q = ops::mul(factor.clone(), right[col][j].clone())?;
                    right[r][j] = ops::sub(right[r][j].clone(), q)?;
                }
            }
        }
        Matrix::from_rows(right)
    }
}

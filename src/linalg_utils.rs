extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;
use ndarray_linalg::{EigValsh, UPLO};

use std::ops::MulAssign;

use crate::error::*;

///Scales the columns of `a` by the respective scaling factors in `b`. Useful
///for efficiently computing right-multiplication by a diagonal matrix.
pub fn scale_columns(a : ArrayView2<f64>, b : ArrayView1<f64>) -> Array2<f64> {
    let mut result = a.to_owned();
    let n = a.shape()[1];
    for i in 0..n {
        let scale = b[[i,]];
        let mut column = result.column_mut(i);
        column.mul_assign(scale);
    }
    result
}

///Computes `(a + a^T) / 2`
pub fn symmetrize(a : ArrayView2<f64>) -> Array2<f64> {
    let mut symmetrized : Array2<f64> = a.t().to_owned();
    symmetrized += &a;
    symmetrized *= 0.5f64;
    symmetrized
}

///Ascending eigenvalues of the symmetric part of `a`.
pub fn symmetric_eigenvalues(a : ArrayView2<f64>) -> Result<Array1<f64>, GpPdfError> {
    let symmetrized = symmetrize(a);
    let eigenvals = symmetrized.eigvalsh(UPLO::Lower)?;
    Ok(eigenvals)
}

pub fn min_eigenvalue(a : ArrayView2<f64>) -> Result<f64, GpPdfError> {
    let eigenvals = symmetric_eigenvalues(a)?;
    Ok(eigenvals.iter().cloned().fold(std::f64::INFINITY, f64::min))
}

///The largest eigenvalue magnitude, used to make tolerances relative to the matrix.
pub fn spectral_scale(eigenvals : ArrayView1<f64>) -> f64 {
    eigenvals.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn diag(entries : &[f64]) -> Array2<f64> {
        let mut result = Array::zeros((entries.len(), entries.len()));
        for (i, entry) in entries.iter().enumerate() {
            result[[i, i]] = *entry;
        }
        result
    }

    #[test]
    fn scale_columns_is_right_diagonal_product() {
        let a = random_matrix(4, 3);
        let b = arr1(&[2.0, -1.0, 0.5]);
        let expected = a.dot(&diag(&[2.0, -1.0, 0.5]));
        assert_equal_matrices(&scale_columns(a.view(), b.view()), &expected);
    }

    #[test]
    fn min_eigenvalue_of_diagonal() {
        let a = diag(&[3.0, -2.0, 5.0]);
        assert!((min_eigenvalue(a.view()).unwrap() + 2.0).abs() < DEFAULT_TEST_THRESH);
    }
}

extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;
use ndarray_linalg::{Eigh, UPLO};

use crate::error::*;
use crate::linalg_utils::*;

///A factor `L = V sqrt(E)` of a symmetric PSD matrix `M = V E V^T`, so that `L L^T = M`.
///Eigenvalues within `tolerance` (relative to the largest one) below zero are
///clamped to zero; anything more negative is rejected.
pub fn psd_factor(in_mat : ArrayView2<f64>, tolerance : f64) -> Result<Array2<f64>, GpPdfError> {
    let symmetrized = symmetrize(in_mat);
    let (mut eigenvals, eigenvecs) = symmetrized.eigh(UPLO::Lower)?;

    let scale = spectral_scale(eigenvals.view());
    let min_eigenval = eigenvals.iter().cloned().fold(std::f64::INFINITY, f64::min);
    if (!(min_eigenval >= -tolerance * scale)) {
        return Err(GpPdfError::NonPositiveSemiDefiniteInput { min_eigenvalue : min_eigenval });
    }
    for i in 0..eigenvals.shape()[0] {
        let sq_val = eigenvals[[i,]];
        eigenvals[[i,]] = if (sq_val > 0.0f64) { sq_val.sqrt() } else { 0.0f64 };
    }
    Ok(scale_columns(eigenvecs.view(), eigenvals.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::*;
    use crate::test_utils::*;

    #[test]
    fn factor_reconstitutes_matrix() {
        let matrix = random_psd_matrix(6);
        let factor = psd_factor(matrix.view(), PSD_TOLERANCE).unwrap();
        assert_equal_matrices_to_within(&factor.dot(&factor.t()), &matrix, 1e-8);
    }

    #[test]
    fn indefinite_matrix_is_rejected() {
        let mut matrix = Array::eye(3);
        matrix[[2, 2]] = -0.5;
        match psd_factor(matrix.view(), PSD_TOLERANCE) {
            Err(GpPdfError::NonPositiveSemiDefiniteInput { min_eigenvalue }) => {
                assert!((min_eigenvalue + 0.5).abs() < DEFAULT_TEST_THRESH);
            },
            other => panic!("unexpected result {:?}", other)
        }
    }
}

extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;

use crate::error::*;
use crate::linalg_utils::*;
use crate::params::*;

///Forces a covariance matrix to be positive-semidefinite by repeatedly adding
///`-overshoot_factor * min_eigenvalue` to its diagonal until no negative
///eigenvalue remains. Sample covariances of rank-deficient ensembles
///typically need one or two steps.
#[derive(Clone, Copy, Debug)]
pub struct CovarianceRegularizer {
    pub overshoot_factor : f64,
    pub max_iterations : usize
}

impl Default for CovarianceRegularizer {
    fn default() -> Self {
        CovarianceRegularizer {
            overshoot_factor : DEFAULT_OVERSHOOT_FACTOR,
            max_iterations : DEFAULT_MAX_REGULARIZATION_ITERS
        }
    }
}

fn add_to_diagonal(matrix : &mut Array2<f64>, shift : f64) {
    for element in matrix.diag_mut() {
        *element += shift;
    }
}

impl CovarianceRegularizer {
    pub fn new(overshoot_factor : f64, max_iterations : usize) -> CovarianceRegularizer {
        CovarianceRegularizer {
            overshoot_factor,
            max_iterations
        }
    }

    ///Regularizes `covariance` in place, returning the number of diagonal shifts applied.
    pub fn regularize_in_place(&self, covariance : &mut Array2<f64>) -> Result<usize, GpPdfError> {
        if (covariance.shape()[0] != covariance.shape()[1]) {
            return Err(GpPdfError::ShapeMismatch(
                format!("covariance must be square, got {:?}", covariance.shape())));
        }
        let mut min_eig = min_eigenvalue(covariance.view())?;
        let mut iterations = 0;
        while (!(min_eig >= 0.0)) {
            if (iterations == self.max_iterations || !min_eig.is_finite()) {
                error!("Covariance regularization failed after {} steps", iterations);
                return Err(GpPdfError::RegularizationDivergence {
                    iterations,
                    min_eigenvalue : min_eig
                });
            }
            warn!("Covariance matrix not positive-semidefinite");
            warn!("Minimum eigenvalue: {:e}", min_eig);
            warn!("Introducing regulator...");
            add_to_diagonal(covariance, -self.overshoot_factor * min_eig);
            iterations += 1;

            let new_min_eig = min_eigenvalue(covariance.view())?;
            warn!("Regularization step {}: minimum eigenvalue {:e} -> {:e}", iterations, min_eig, new_min_eig);
            min_eig = new_min_eig;
        }
        debug!("Covariance is positive-semidefinite after {} regularization steps", iterations);
        Ok(iterations)
    }

    pub fn regularize(&self, mut covariance : Array2<f64>) -> Result<Array2<f64>, GpPdfError> {
        self.regularize_in_place(&mut covariance)?;
        Ok(covariance)
    }
}

///Regularizes `covariance` with the default overshoot factor.
pub fn regularize(covariance : Array2<f64>, max_iterations : usize) -> Result<Array2<f64>, GpPdfError> {
    CovarianceRegularizer::new(DEFAULT_OVERSHOOT_FACTOR, max_iterations).regularize(covariance)
}

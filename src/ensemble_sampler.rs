extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;

use rand::prelude::*;
use ndarray_rand::RandomExt;
use rand_distr::StandardNormal;

use crate::error::*;
use crate::gp_model::*;
use crate::params::*;
use crate::sqrtm::*;

///Draws independent samples from the multivariate normal defined by a
///[`GaussianProcessModel`]. The covariance is factorized once on construction.
pub struct EnsembleSampler {
    center : Array1<f64>,
    covariance_factor : Array2<f64>
}

impl EnsembleSampler {
    ///Fails with [`GpPdfError::NonPositiveSemiDefiniteInput`] if the model's
    ///covariance has not been regularized.
    pub fn new(model : &GaussianProcessModel) -> Result<EnsembleSampler, GpPdfError> {
        EnsembleSampler::with_tolerance(model, PSD_TOLERANCE)
    }

    ///As [`EnsembleSampler::new`], accepting eigenvalues down to `-tolerance`
    ///relative to the largest one.
    pub fn with_tolerance(model : &GaussianProcessModel, tolerance : f64) -> Result<EnsembleSampler, GpPdfError> {
        let covariance_factor = psd_factor(model.covariance.view(), tolerance)?;
        let center = model.mean.clone();
        Ok(EnsembleSampler {
            center,
            covariance_factor
        })
    }

    pub fn sample<R : Rng + ?Sized>(&self, rng : &mut R) -> Array1<f64> {
        let n = self.center.shape()[0];
        let std_norm_vec : Array1<f64> = Array::random_using((n,), StandardNormal, rng);
        let mut result = self.covariance_factor.dot(&std_norm_vec);
        result += &self.center;
        result
    }

    ///`num_samples` draws, one per row.
    pub fn sample_many<R : Rng + ?Sized>(&self, num_samples : usize, rng : &mut R) -> Array2<f64> {
        let n = self.center.shape()[0];
        let std_norm_mat : Array2<f64> = Array::random_using((num_samples, n), StandardNormal, rng);
        let mut result = std_norm_mat.dot(&self.covariance_factor.t());
        result += &self.center;
        result
    }
}

///Draws `num_samples` rows from `model`.
pub fn sample<R : Rng + ?Sized>(model : &GaussianProcessModel, num_samples : usize,
                                rng : &mut R) -> Result<Array2<f64>, GpPdfError> {
    info!("Generating {} GP samples over {} points", num_samples, model.flat_dim());
    let sampler = EnsembleSampler::new(model)?;
    Ok(sampler.sample_many(num_samples, rng))
}

///The synthetic central member: the average of all sampled rows.
pub fn central_member(samples : &Array2<f64>) -> Result<Array1<f64>, GpPdfError> {
    samples.mean_axis(Axis(0))
           .ok_or_else(|| GpPdfError::ShapeMismatch(String::from("cannot average an empty sample set")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate_grid::*;
    use crate::test_utils::*;
    use rand::rngs::StdRng;

    fn model_with(mean : Array1<f64>, covariance : Array2<f64>) -> GaussianProcessModel {
        let n = mean.len();
        let xgrid = CoordinateGrid::logspace(-2.0, 0.0, n).unwrap();
        GaussianProcessModel::new(String::from("test"), mean, covariance, 1.65, vec![21], xgrid).unwrap()
    }

    #[test]
    fn samples_converge_to_model_moments() {
        let num_samps = 100000;
        let covariance = arr2(&[[2.0, 0.6, 0.0],
                                [0.6, 1.0, -0.3],
                                [0.0, -0.3, 0.5]]);
        let mean = arr1(&[1.0, -2.0, 0.5]);
        let model = model_with(mean.clone(), covariance.clone());

        let mut rng = StdRng::seed_from_u64(0x6770_7064);
        let samples = sample(&model, num_samps, &mut rng).unwrap();
        assert_eq!(samples.shape(), &[num_samps, 3]);

        let empirical_mean = central_member(&samples).unwrap();
        let mut centred = samples.clone();
        centred -= &empirical_mean;
        let empirical_covariance = centred.t().dot(&centred) / ((num_samps - 1) as f64);

        assert_equal_vectors_to_within(&empirical_mean, &mean, 0.03);
        assert_equal_matrices_to_within(&empirical_covariance, &covariance, 0.05);
    }

    #[test]
    fn single_draws_match_batched_draws_in_distribution() {
        let covariance = arr2(&[[1.0, 0.0], [0.0, 4.0]]);
        let model = model_with(arr1(&[0.0, 10.0]), covariance);
        let sampler = EnsembleSampler::new(&model).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut total = Array::zeros((2,));
        let num_samps = 20000;
        for _ in 0..num_samps {
            total += &sampler.sample(&mut rng);
        }
        total /= num_samps as f64;
        assert_equal_vectors_to_within(&total, &arr1(&[0.0, 10.0]), 0.1);
    }

    #[test]
    fn zero_covariance_reproduces_mean() {
        let model = model_with(arr1(&[1.0, 2.0]), Array::zeros((2, 2)));
        let mut rng = StdRng::seed_from_u64(1);
        let samples = sample(&model, 3, &mut rng).unwrap();
        for row in samples.genrows() {
            assert_equal_vectors(&row.to_owned(), &model.mean);
        }
    }

    #[test]
    fn unregularized_covariance_is_refused() {
        let covariance = arr2(&[[1.0, 0.0], [0.0, -1.0]]);
        let model = model_with(arr1(&[0.0, 0.0]), covariance);
        let mut rng = StdRng::seed_from_u64(1);
        match sample(&model, 10, &mut rng) {
            Err(GpPdfError::NonPositiveSemiDefiniteInput { .. }) => {},
            other => panic!("unexpected result {:?}", other)
        }
    }
}

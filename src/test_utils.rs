extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;
use ndarray_linalg::*;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;

pub use crate::params::DEFAULT_TEST_THRESH;

pub fn assert_equal_matrices(one : &Array2<f64>, two : &Array2<f64>) {
    assert_equal_matrices_to_within(one, two, DEFAULT_TEST_THRESH);
}

pub fn assert_equal_matrices_to_within(one : &Array2<f64>, two : &Array2<f64>, within : f64) {
    assert_eq!(one.shape(), two.shape());
    let diff = one - two;
    let frob_norm = diff.opnorm_fro().unwrap();
    if (frob_norm > within) {
        println!("{}", one);
        println!("is not equal to");
        println!("{}", two);
        panic!("Frobenius distance {} exceeds {}", frob_norm, within);
    }
}

pub fn assert_equal_vectors(one : &Array1<f64>, two : &Array1<f64>) {
    assert_equal_vectors_to_within(one, two, DEFAULT_TEST_THRESH);
}

pub fn assert_equal_vectors_to_within(one : &Array1<f64>, two : &Array1<f64>, within : f64) {
    assert_eq!(one.len(), two.len());
    let diff = one - two;
    let dist = diff.dot(&diff).sqrt();
    if (dist > within) {
        panic!("{} is not equal to {} (distance {})", one, two, dist);
    }
}

pub fn random_matrix(t : usize, s : usize) -> Array2<f64> {
    Array::random((t, s), StandardNormal)
}

pub fn random_psd_matrix(t : usize) -> Array2<f64> {
    let matrix_sqrt = random_matrix(t, t);
    matrix_sqrt.t().dot(&matrix_sqrt)
}

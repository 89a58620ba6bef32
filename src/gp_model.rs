extern crate ndarray;

use ndarray::*;

use crate::coordinate_grid::*;
use crate::error::*;
use crate::flat_index::*;

///The Gaussian process fitted to a prior replica set: its mean and covariance
///over the flattened (flavour, x) grid at the reference scale `q0`.
#[derive(Clone, Debug)]
pub struct GaussianProcessModel {
    pub prior : String,
    pub mean : Array1<f64>,
    pub covariance : Array2<f64>,
    pub q0 : f64,
    pub flavours : Vec<i32>,
    pub xgrid : CoordinateGrid
}

impl GaussianProcessModel {
    pub fn new(prior : String, mean : Array1<f64>, covariance : Array2<f64>, q0 : f64,
               flavours : Vec<i32>, xgrid : CoordinateGrid) -> Result<GaussianProcessModel, GpPdfError> {
        let flat_dim = flavours.len() * xgrid.len();
        if (mean.len() != flat_dim) {
            return Err(GpPdfError::ShapeMismatch(
                format!("mean has length {}, expected {} flavours x {} points", mean.len(), flavours.len(), xgrid.len())));
        }
        if (covariance.shape()[0] != flat_dim || covariance.shape()[1] != flat_dim) {
            return Err(GpPdfError::ShapeMismatch(
                format!("covariance has shape {:?}, expected {}x{}", covariance.shape(), flat_dim, flat_dim)));
        }
        Ok(GaussianProcessModel {
            prior,
            mean,
            covariance,
            q0,
            flavours,
            xgrid
        })
    }

    pub fn layout(&self) -> FlatLayout {
        FlatLayout::new(self.flavours.len(), self.xgrid.len())
    }

    pub fn flat_dim(&self) -> usize {
        self.mean.len()
    }

    ///The GP 1-sigma uncertainty at every flat index.
    pub fn errors(&self) -> Array1<f64> {
        self.covariance.diag().mapv(|v| v.max(0.0).sqrt())
    }

    pub fn flavour_mean(&self, channel_position : usize) -> ArrayView1<f64> {
        self.layout().channel_slice(self.mean.view(), channel_position)
    }
}

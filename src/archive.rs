extern crate ndarray;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use ndarray::*;
use serde::{Deserialize, Serialize};

use crate::coordinate_grid::*;
use crate::error::*;
use crate::gp_model::*;

///Everything needed to export a sampled GP: the model itself, the name of
///the set to be written and the sample matrix (one row per sample).
///Stored as gzip-compressed bincode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GpArchive {
    pub prior : String,
    pub setname : String,
    pub mean : Array1<f64>,
    pub covariance : Array2<f64>,
    pub q0 : f64,
    pub flavours : Vec<i32>,
    pub xgrid : Vec<f64>,
    pub samples : Array2<f64>
}

impl GpArchive {
    pub fn new(model : &GaussianProcessModel, setname : String, samples : Array2<f64>) -> GpArchive {
        GpArchive {
            prior : model.prior.clone(),
            setname,
            mean : model.mean.clone(),
            covariance : model.covariance.clone(),
            q0 : model.q0,
            flavours : model.flavours.clone(),
            xgrid : model.xgrid.points().to_vec(),
            samples
        }
    }

    ///Rebuilds the model, checking that every array has a consistent shape.
    pub fn model(&self) -> Result<GaussianProcessModel, GpPdfError> {
        let xgrid = CoordinateGrid::from_points(self.xgrid.clone())?;
        let model = GaussianProcessModel::new(self.prior.clone(), self.mean.clone(), self.covariance.clone(),
                                              self.q0, self.flavours.clone(), xgrid)?;
        if (self.samples.shape()[1] != model.flat_dim()) {
            return Err(GpPdfError::ShapeMismatch(
                format!("samples have {} columns, model has {} points", self.samples.shape()[1], model.flat_dim())));
        }
        Ok(model)
    }

    pub fn num_samples(&self) -> usize {
        self.samples.shape()[0]
    }

    pub fn save(&self, path : &Path) -> Result<(), GpPdfError> {
        let file = File::create(path).map_err(|e| GpPdfError::serialization_io(path, e))?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        bincode::serialize_into(&mut encoder, self)?;
        let mut writer = encoder.finish().map_err(|e| GpPdfError::serialization_io(path, e))?;
        writer.flush().map_err(|e| GpPdfError::serialization_io(path, e))?;
        info!("Archived {} samples of {} to {}", self.num_samples(), self.prior, path.display());
        Ok(())
    }

    pub fn load(path : &Path) -> Result<GpArchive, GpPdfError> {
        let file = File::open(path)?;
        let decoder = GzDecoder::new(BufReader::new(file));
        let archive : GpArchive = bincode::deserialize_from(decoder)?;
        Ok(archive)
    }
}

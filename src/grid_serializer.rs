extern crate ndarray;

use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::*;
use rayon::prelude::*;

use crate::coordinate_grid::*;
use crate::ensemble_sampler::*;
use crate::error::*;
use crate::gp_model::*;
use crate::grid_format::*;
use crate::info_template::*;
use crate::lhagrid_set::member_file_name;

const STAGING_PREFIX : &str = ".gppdf-staging-";
const RETIRED_PREFIX : &str = ".gppdf-retired-";

///Writes a sampled GP as an `lhagrid1` set `<output_directory>/<set_name>/`.
///Member 0 is the average of the samples, members `1..=N` the samples themselves.
///
///All files are written to a staging directory next to the final location,
///which is only moved into place once every file has been written. On any
///failure the staging directory is removed and no set is published. A set
///already at the target is moved aside first and restored if the new one
///cannot be moved in.
pub struct GridSerializer {
    pub output_directory : PathBuf,
    pub set_name : String,
    pub scales : ScaleGrid,
    pub info_template : String,
    pub parallel_writes : bool
}

fn write_file<F>(path : &Path, body : F) -> Result<(), GpPdfError>
    where F : FnOnce(&mut BufWriter<File>) -> std::io::Result<()> {
    let file = File::create(path).map_err(|e| GpPdfError::serialization_io(path, e))?;
    let mut writer = BufWriter::new(file);
    body(&mut writer).and_then(|_| writer.flush())
                     .map_err(|e| GpPdfError::serialization_io(path, e))
}

impl GridSerializer {
    pub fn new(output_directory : PathBuf, set_name : String, scales : ScaleGrid) -> GridSerializer {
        GridSerializer {
            output_directory,
            set_name,
            scales,
            info_template : DEFAULT_INFO_TEMPLATE.to_string(),
            parallel_writes : true
        }
    }

    pub fn set_directory(&self) -> PathBuf {
        self.output_directory.join(&self.set_name)
    }

    pub fn info_fields(&self, model : &GaussianProcessModel, num_samples : usize) -> InfoFields {
        InfoFields {
            set_name : self.set_name.clone(),
            prior : model.prior.clone(),
            xmin : model.xgrid.min(),
            xmax : model.xgrid.max(),
            qmin : self.scales.min(),
            qmax : self.scales.max(),
            num_members : num_samples + 1,
            flavours : model.flavours.clone()
        }
    }

    fn write_member_file(&self, directory : &Path, model : &GaussianProcessModel,
                         member : usize, values : ArrayView1<f64>) -> Result<(), GpPdfError> {
        let path = directory.join(member_file_name(&self.set_name, member));
        write_file(&path, |out| write_member(out, member, model.xgrid.points(), self.scales.points(),
                                             &model.flavours, values))
    }

    fn write_all(&self, directory : &Path, model : &GaussianProcessModel,
                 samples : &Array2<f64>) -> Result<(), GpPdfError> {
        let central = central_member(samples)?;
        let num_samples = samples.shape()[0];

        let write_one = |member : usize| -> Result<(), GpPdfError> {
            let values = if (member == 0) { central.view() } else { samples.row(member - 1) };
            self.write_member_file(directory, model, member, values)
        };
        if (self.parallel_writes) {
            (0..=num_samples).into_par_iter().try_for_each(write_one)?;
        } else {
            (0..=num_samples).try_for_each(write_one)?;
        }

        let info_path = directory.join(format!("{}.info", self.set_name));
        let rendered = render_info(&self.info_template, &self.info_fields(model, num_samples));
        write_file(&info_path, |out| out.write_all(rendered.as_bytes()))
    }

    ///Writes the full set, returning the directory it was published to.
    pub fn write(&self, model : &GaussianProcessModel, samples : &Array2<f64>) -> Result<PathBuf, GpPdfError> {
        if (samples.shape()[1] != model.flat_dim()) {
            return Err(GpPdfError::ShapeMismatch(
                format!("samples have {} columns, model has {} points", samples.shape()[1], model.flat_dim())));
        }
        if (samples.shape()[0] == 0) {
            return Err(GpPdfError::ShapeMismatch(String::from("no samples to write")));
        }
        let output_directory = &self.output_directory;
        fs::create_dir_all(output_directory).map_err(|e| GpPdfError::serialization_io(output_directory, e))?;

        let staging = tempfile::Builder::new()
                          .prefix(STAGING_PREFIX)
                          .tempdir_in(output_directory)
                          .map_err(|e| GpPdfError::serialization_io(output_directory, e))?;

        info!("Writing {} members of {} to {}", samples.shape()[0] + 1, self.set_name, output_directory.display());
        if let Err(err) = self.write_all(staging.path(), model, samples) {
            error!("Export of {} failed, discarding partial output: {}", self.set_name, err);
            return Err(err);
        }

        let target = self.set_directory();
        self.publish(staging.path(), &target)?;
        info!("Results output to {}", target.display());
        Ok(target)
    }

    fn publish(&self, staged : &Path, target : &Path) -> Result<(), GpPdfError> {
        if (!target.exists()) {
            return fs::rename(staged, target).map_err(|e| GpPdfError::serialization_io(target, e));
        }
        warn!("Replacing existing set at {}", target.display());
        //Dropping `retired` deletes the previous set
        let retired = tempfile::Builder::new()
                          .prefix(RETIRED_PREFIX)
                          .tempdir_in(&self.output_directory)
                          .map_err(|e| GpPdfError::serialization_io(&self.output_directory, e))?;
        let previous = retired.path().join(&self.set_name);
        fs::rename(target, &previous).map_err(|e| GpPdfError::serialization_io(target, e))?;
        if let Err(err) = fs::rename(staged, target) {
            if let Err(restore) = fs::rename(&previous, target) {
                error!("Could not restore previous set at {}: {}", target.display(), restore);
                let _ = retired.keep();
            }
            return Err(GpPdfError::serialization_io(target, err));
        }
        Ok(())
    }
}

use std::path::PathBuf;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::archive::*;
use crate::config::*;
use crate::ensemble_provider::*;
use crate::ensemble_sampler::*;
use crate::error::*;
use crate::flavour_selector::*;
use crate::gp_model::*;
use crate::grid_serializer::*;
use crate::info_template::*;
use crate::params::*;
use crate::statistics_estimator::*;

///Fits a GP to a prior replica set, samples it, archives the samples and
///exports them as a grid set, all driven by one [`GpPdfConfig`].
pub struct Pipeline {
    pub config : GpPdfConfig
}

impl Pipeline {
    pub fn new(config : GpPdfConfig) -> Pipeline {
        Pipeline {
            config
        }
    }

    ///The configured reference scale, or the prior's `QMin`.
    pub fn reference_scale(&self, provider : &dyn EnsembleProvider) -> Result<f64, GpPdfError> {
        match self.config.scales.reference_scale {
            Some(q0) => Ok(q0),
            None => provider.metadata_f64("QMin")
        }
    }

    ///A seeded generator if the config has a seed, otherwise one from entropy.
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        }
    }

    ///Measures the mean and covariance of `provider`'s replicas and regularizes the covariance.
    pub fn generate(&self, provider : &dyn EnsembleProvider, prior : &str) -> Result<GaussianProcessModel, GpPdfError> {
        let q0 = self.reference_scale(provider)?;
        let flavours = select(provider, q0)?;
        let xgrid = self.config.grid.coordinate_grid()?;

        let (mean, mut covariance) = estimate(provider, &flavours, &xgrid, q0, &provider.replica_indices())?;
        let iterations = self.config.regularization.regularizer().regularize_in_place(&mut covariance)?;
        if (iterations > 0) {
            info!("Covariance regularized in {} steps", iterations);
        }
        GaussianProcessModel::new(prior.to_string(), mean, covariance, q0, flavours, xgrid)
    }

    pub fn set_name(&self, prior : &str, num_samples : usize) -> String {
        match &self.config.output.set_name {
            Some(name) => name.clone(),
            None => default_set_name(prior, num_samples)
        }
    }

    ///Draws `num_samples` from `model` and bundles them into an archive.
    pub fn sample<R : Rng + ?Sized>(&self, model : &GaussianProcessModel, num_samples : usize,
                                    rng : &mut R) -> Result<GpArchive, GpPdfError> {
        info!("Generating {} GP samples over {} points", num_samples, model.flat_dim());
        let sampler = EnsembleSampler::with_tolerance(model, self.config.regularization.tolerance)?;
        let samples = sampler.sample_many(num_samples, rng);
        Ok(GpArchive::new(model, self.set_name(&model.prior, num_samples), samples))
    }

    pub fn archive_path(&self, archive : &GpArchive) -> PathBuf {
        self.config.output.directory.join(format!("{}.{}", archive.setname, ARCHIVE_EXTENSION))
    }

    pub fn save_archive(&self, archive : &GpArchive) -> Result<PathBuf, GpPdfError> {
        let directory = &self.config.output.directory;
        std::fs::create_dir_all(directory).map_err(|e| GpPdfError::serialization_io(directory, e))?;
        let path = self.archive_path(archive);
        archive.save(&path)?;
        Ok(path)
    }

    pub fn serializer(&self, archive : &GpArchive) -> Result<GridSerializer, GpPdfError> {
        let scales = self.config.scales.scale_grid(archive.q0)?;
        let mut serializer = GridSerializer::new(self.config.output.directory.clone(),
                                                 archive.setname.clone(), scales);
        serializer.info_template = match self.config.info_template()? {
            Some(template) => template,
            None => DEFAULT_INFO_TEMPLATE.to_string()
        };
        serializer.parallel_writes = self.config.output.parallel_writes;
        Ok(serializer)
    }

    ///Writes the grid set for `archive`, returning the set directory.
    pub fn export(&self, archive : &GpArchive) -> Result<PathBuf, GpPdfError> {
        let model = archive.model()?;
        self.serializer(archive)?.write(&model, &archive.samples)
    }

    ///generate -> sample -> archive -> export
    pub fn run(&self, provider : &dyn EnsembleProvider, prior : &str,
               num_samples : usize) -> Result<PathBuf, GpPdfError> {
        let model = self.generate(provider, prior)?;
        let mut rng = self.rng();
        let archive = self.sample(&model, num_samples, &mut rng)?;
        self.save_archive(&archive)?;
        self.export(&archive)
    }
}

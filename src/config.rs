use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::coordinate_grid::*;
use crate::covariance_regularizer::*;
use crate::error::*;
use crate::params::*;

///The x-grid the prior is sampled on: either explicit points or a log-spaced grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "GridConfig::default_log10_min")]
    pub log10_min : f64,
    #[serde(default = "GridConfig::default_log10_max")]
    pub log10_max : f64,
    #[serde(default = "GridConfig::default_num_points")]
    pub num_points : usize,
    #[serde(default)]
    pub points : Option<Vec<f64>>
}

impl GridConfig {
    fn default_log10_min() -> f64 {
        DEFAULT_LOG10_X_MIN
    }
    fn default_log10_max() -> f64 {
        DEFAULT_LOG10_X_MAX
    }
    fn default_num_points() -> usize {
        DEFAULT_NUM_X_POINTS
    }

    pub fn coordinate_grid(&self) -> Result<CoordinateGrid, GpPdfError> {
        match &self.points {
            Some(points) => CoordinateGrid::from_points(points.clone()),
            None => CoordinateGrid::logspace(self.log10_min, self.log10_max, self.num_points)
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            log10_min : Self::default_log10_min(),
            log10_max : Self::default_log10_max(),
            num_points : Self::default_num_points(),
            points : None
        }
    }
}

///The reference scale and the scale grid written to exported members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    ///Overrides the prior's `QMin`.
    #[serde(default)]
    pub reference_scale : Option<f64>,
    #[serde(default = "ScaleConfig::default_bracket_half_width")]
    pub bracket_half_width : f64,
    ///Overrides the bracket around the reference scale.
    #[serde(default)]
    pub points : Option<Vec<f64>>
}

impl ScaleConfig {
    fn default_bracket_half_width() -> f64 {
        DEFAULT_SCALE_BRACKET_HALF_WIDTH
    }

    pub fn scale_grid(&self, q0 : f64) -> Result<ScaleGrid, GpPdfError> {
        match &self.points {
            Some(points) => ScaleGrid::from_points(points.clone()),
            None => ScaleGrid::bracket(q0, self.bracket_half_width)
        }
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            reference_scale : None,
            bracket_half_width : Self::default_bracket_half_width(),
            points : None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularizationConfig {
    #[serde(default = "RegularizationConfig::default_overshoot_factor")]
    pub overshoot_factor : f64,
    #[serde(default = "RegularizationConfig::default_max_iterations")]
    pub max_iterations : usize,
    ///Relative negative-eigenvalue slack the sampler tolerates.
    #[serde(default = "RegularizationConfig::default_tolerance")]
    pub tolerance : f64
}

impl RegularizationConfig {
    fn default_overshoot_factor() -> f64 {
        DEFAULT_OVERSHOOT_FACTOR
    }
    fn default_max_iterations() -> usize {
        DEFAULT_MAX_REGULARIZATION_ITERS
    }
    fn default_tolerance() -> f64 {
        PSD_TOLERANCE
    }

    pub fn regularizer(&self) -> CovarianceRegularizer {
        CovarianceRegularizer::new(self.overshoot_factor, self.max_iterations)
    }
}

impl Default for RegularizationConfig {
    fn default() -> Self {
        Self {
            overshoot_factor : Self::default_overshoot_factor(),
            max_iterations : Self::default_max_iterations(),
            tolerance : Self::default_tolerance()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_directory")]
    pub directory : PathBuf,
    ///Defaults to `GP_<prior>_<nsamples>`.
    #[serde(default)]
    pub set_name : Option<String>,
    ///Path of an info-file template; the built-in one is used if unset.
    #[serde(default)]
    pub info_template : Option<PathBuf>,
    #[serde(default = "OutputConfig::default_parallel_writes")]
    pub parallel_writes : bool
}

impl OutputConfig {
    fn default_directory() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)
    }
    fn default_parallel_writes() -> bool {
        true
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory : Self::default_directory(),
            set_name : None,
            info_template : None,
            parallel_writes : Self::default_parallel_writes()
        }
    }
}

///Every tunable of a generation/export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GpPdfConfig {
    #[serde(default)]
    pub grid : GridConfig,
    #[serde(default)]
    pub scales : ScaleConfig,
    #[serde(default)]
    pub regularization : RegularizationConfig,
    #[serde(default)]
    pub output : OutputConfig,
    ///Seeds the sampler; fresh entropy is used if unset.
    #[serde(default)]
    pub seed : Option<u64>
}

impl GpPdfConfig {
    pub fn from_toml(contents : &str) -> Result<GpPdfConfig, GpPdfError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path : &Path) -> Result<GpPdfConfig, GpPdfError> {
        let contents = fs::read_to_string(path)?;
        GpPdfConfig::from_toml(&contents)
    }

    pub fn load_or_default(path : &Path) -> GpPdfConfig {
        if (!path.exists()) {
            return GpPdfConfig::default();
        }
        match GpPdfConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to load config {}: {}. Using defaults.", path.display(), err);
                GpPdfConfig::default()
            }
        }
    }

    ///An explicitly requested config must load; otherwise the default path
    ///is tried and defaults are used if it is absent or unreadable.
    pub fn resolve(path : Option<&Path>) -> Result<GpPdfConfig, GpPdfError> {
        match path {
            Some(path) => GpPdfConfig::load(path),
            None => Ok(GpPdfConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH)))
        }
    }

    pub fn info_template(&self) -> Result<Option<String>, GpPdfError> {
        match &self.output.info_template {
            Some(path) => Ok(Some(fs::read_to_string(path)?)),
            None => Ok(None)
        }
    }
}

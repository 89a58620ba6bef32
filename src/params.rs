//Regularization constants
//
//Multiple of the (negative) minimum eigenvalue added to the diagonal on each
//regularization step. Deliberately overshoots; calibrated against reference output.
pub const DEFAULT_OVERSHOOT_FACTOR : f64 = 100.0f64;

pub const DEFAULT_MAX_REGULARIZATION_ITERS : usize = 50;

//Relative to the largest absolute eigenvalue of the matrix being checked
pub const PSD_TOLERANCE : f64 = 1e-10f64;

//Grid constants
pub const DEFAULT_LOG10_X_MIN : f64 = -3.0f64;
pub const DEFAULT_LOG10_X_MAX : f64 = 0.0f64;
pub const DEFAULT_NUM_X_POINTS : usize = 200;

//Half-width of the degenerate scale bracket written around the reference scale
pub const DEFAULT_SCALE_BRACKET_HALF_WIDTH : f64 = 0.01f64;

pub const DEFAULT_OUTPUT_DIRECTORY : &str = "output";
pub const DEFAULT_CONFIG_PATH : &str = "gppdf.toml";

//Grid file format constants
pub const GRID_FORMAT_NAME : &str = "lhagrid1";
pub const BLOCK_SEPARATOR : &str = "---";
pub const MEMBER_INDEX_WIDTH : usize = 4;
pub const ARCHIVE_EXTENSION : &str = "gpz";

//Flavour codes
pub const GLUON : i32 = 21;
pub const CHARM : i32 = 4;
pub const BOTTOM : i32 = 5;
pub const TOP : i32 = 6;

pub const DEFAULT_TEST_THRESH : f64 = 1e-9f64;

///The default name of a generated set, given the name of the prior and
///the number of samples drawn from the GP.
pub fn default_set_name(prior : &str, num_samples : usize) -> String {
    format!("GP_{}_{}", prior, num_samples)
}

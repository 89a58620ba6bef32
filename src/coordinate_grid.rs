extern crate ndarray;

use ndarray::*;
use serde::{Deserialize, Serialize};

use crate::error::*;

fn check_strictly_increasing(points : &[f64], what : &str) -> Result<(), GpPdfError> {
    if (points.is_empty()) {
        return Err(GpPdfError::InvalidGrid(format!("{} grid is empty", what)));
    }
    for (i, point) in points.iter().enumerate() {
        if (!point.is_finite()) {
            return Err(GpPdfError::InvalidGrid(format!("{} grid point {} is not finite", what, i)));
        }
        if (i > 0 && points[i - 1] >= *point) {
            return Err(GpPdfError::InvalidGrid(
                format!("{} grid is not strictly increasing at position {}", what, i)));
        }
    }
    Ok(())
}

///The x-axis every flavour is sampled on. Strictly increasing and immutable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateGrid {
    points : Vec<f64>
}

impl CoordinateGrid {
    pub fn from_points(points : Vec<f64>) -> Result<CoordinateGrid, GpPdfError> {
        check_strictly_increasing(&points, "x")?;
        Ok(CoordinateGrid {
            points
        })
    }

    ///`num_points` points evenly spaced in log10(x) between `10^log10_min` and `10^log10_max`,
    ///both included.
    pub fn logspace(log10_min : f64, log10_max : f64, num_points : usize) -> Result<CoordinateGrid, GpPdfError> {
        if (num_points < 2) {
            return Err(GpPdfError::InvalidGrid(
                format!("log-spaced grid needs at least 2 points, got {}", num_points)));
        }
        let exponents = Array::linspace(log10_min, log10_max, num_points);
        let points : Vec<f64> = exponents.iter().map(|e| 10.0f64.powf(*e)).collect();
        CoordinateGrid::from_points(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}

///Scales at which every member is tabulated in an exported grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleGrid {
    points : Vec<f64>
}

impl ScaleGrid {
    pub fn from_points(points : Vec<f64>) -> Result<ScaleGrid, GpPdfError> {
        check_strictly_increasing(&points, "scale")?;
        Ok(ScaleGrid {
            points
        })
    }

    ///The degenerate two-point grid `[q0 - half_width, q0 + half_width]`.
    ///The GP is only known at `q0`, so the same values are written at both knots.
    pub fn bracket(q0 : f64, half_width : f64) -> Result<ScaleGrid, GpPdfError> {
        if (!(half_width > 0.0)) {
            return Err(GpPdfError::InvalidGrid(
                format!("scale bracket half-width must be positive, got {}", half_width)));
        }
        ScaleGrid::from_points(vec![q0 - half_width, q0 + half_width])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logspace_hits_both_endpoints() {
        let grid = CoordinateGrid::logspace(-3.0, 0.0, 4).unwrap();
        let expected = [1e-3, 1e-2, 1e-1, 1.0];
        assert_eq!(grid.len(), 4);
        for (actual, expected) in grid.points().iter().zip(expected.iter()) {
            assert!((actual - expected).abs() < 1e-12 * expected.max(1.0));
        }
    }

    #[test]
    fn unordered_points_are_rejected() {
        assert!(CoordinateGrid::from_points(vec![0.1, 0.1, 0.5]).is_err());
        assert!(CoordinateGrid::from_points(vec![0.5, 0.1]).is_err());
        assert!(CoordinateGrid::from_points(vec![]).is_err());
    }

    #[test]
    fn bracket_is_centred_on_reference_scale() {
        let scales = ScaleGrid::bracket(1.65, 0.01).unwrap();
        assert!((scales.min() - 1.64).abs() < 1e-12);
        assert!((scales.max() - 1.66).abs() < 1e-12);
        assert!(ScaleGrid::bracket(1.65, 0.0).is_err());
    }
}

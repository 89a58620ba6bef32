extern crate ndarray;

use ndarray::*;

use crate::error::*;

///One tabulated block of an `lhagrid1` member: values for every flavour
///on an (x, Q) product grid. Rows of `values` run over x (outer) and Q (inner),
///columns over flavours, exactly as the block is laid out on disk.
///
///Values are interpolated piecewise linearly in ln(x) and Q. LHAPDF itself
///reads such sets with its log-cubic interpolator, so between knots the
///values seen here can differ from LHAPDF's at the level of the
///interpolation error; on knots they agree exactly.
#[derive(Clone, Debug)]
pub struct Subgrid {
    xs : Vec<f64>,
    qs : Vec<f64>,
    flavours : Vec<i32>,
    values : Array2<f64>
}

fn check_knots(name : &str, knots : &[f64]) -> Result<(), GpPdfError> {
    if (knots.is_empty()) {
        return Err(GpPdfError::InvalidGrid(format!("subgrid has no {} knots", name)));
    }
    if (knots.iter().any(|k| !k.is_finite())) {
        return Err(GpPdfError::InvalidGrid(format!("subgrid {} knots must be finite", name)));
    }
    if (knots.windows(2).any(|pair| pair[1] <= pair[0])) {
        return Err(GpPdfError::InvalidGrid(format!("subgrid {} knots must be strictly increasing", name)));
    }
    Ok(())
}

///Bracketing knot index and interpolation weight of `v` within `knots`,
///or `None` if `v` is outside the knots.
fn bracket(knots : &[f64], v : f64, log_scale : bool) -> Option<(usize, f64)> {
    let n = knots.len();
    if (n == 0 || v < knots[0] || v > knots[n - 1]) {
        return None;
    }
    if (n == 1) {
        return Some((0, 0.0));
    }
    let mut lo = 0;
    while (lo + 2 < n && knots[lo + 1] <= v) {
        lo += 1;
    }
    let (a, b) = (knots[lo], knots[lo + 1]);
    let t = if (log_scale && a > 0.0) {
        (v.ln() - a.ln()) / (b.ln() - a.ln())
    } else {
        (v - a) / (b - a)
    };
    Some((lo, t))
}

//Knot values are returned untouched so that a bad neighbour cannot leak in
fn lerp(lo : f64, hi : f64, t : f64) -> f64 {
    if (t == 0.0) {
        lo
    } else if (t == 1.0) {
        hi
    } else {
        (1.0 - t) * lo + t * hi
    }
}

impl Subgrid {
    ///Fails with [`GpPdfError::InvalidGrid`] unless both knot lists are
    ///non-empty and strictly increasing, x is positive, and `values` has one
    ///row per (x, Q) pair and one column per flavour.
    pub fn new(xs : Vec<f64>, qs : Vec<f64>, flavours : Vec<i32>,
               values : Array2<f64>) -> Result<Subgrid, GpPdfError> {
        check_knots("x", &xs)?;
        check_knots("Q", &qs)?;
        if (xs[0] <= 0.0) {
            return Err(GpPdfError::InvalidGrid(format!("subgrid x knots must be positive, found {:e}", xs[0])));
        }
        if (flavours.is_empty()) {
            return Err(GpPdfError::InvalidGrid(String::from("subgrid has no flavours")));
        }
        let expected = [xs.len() * qs.len(), flavours.len()];
        if (values.shape() != &expected[..]) {
            return Err(GpPdfError::InvalidGrid(format!("subgrid values have shape {:?}, expected {:?}",
                                                       values.shape(), expected)));
        }
        Ok(Subgrid {
            xs,
            qs,
            flavours,
            values
        })
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn qs(&self) -> &[f64] {
        &self.qs
    }

    pub fn flavours(&self) -> &[i32] {
        &self.flavours
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn contains_scale(&self, q : f64) -> bool {
        !self.qs.is_empty() && q >= self.qs[0] && q <= self.qs[self.qs.len() - 1]
    }

    fn at(&self, ix : usize, iq : usize, flavour_position : usize) -> f64 {
        self.values[[ix * self.qs.len() + iq, flavour_position]]
    }

    ///Interpolates linearly in ln(x) and linearly in Q. Returns a description
    ///of the problem if the point is not covered by this block.
    pub fn interpolate(&self, channel : i32, x : f64, q : f64) -> Result<f64, String> {
        let flavour_position = self.flavours.iter().position(|f| *f == channel)
                                   .ok_or_else(|| format!("flavour {} is not tabulated", channel))?;
        let (ix, tx) = bracket(&self.xs, x, true)
                           .ok_or_else(|| format!("x outside tabulated range [{:e}, {:e}]",
                                                  self.xs[0], self.xs[self.xs.len() - 1]))?;
        let (iq, tq) = bracket(&self.qs, q, false)
                           .ok_or_else(|| String::from("scale outside tabulated range"))?;

        let ix_hi = (ix + 1).min(self.xs.len() - 1);
        let iq_hi = (iq + 1).min(self.qs.len() - 1);

        let lo_q = lerp(self.at(ix, iq, flavour_position), self.at(ix_hi, iq, flavour_position), tx);
        let hi_q = lerp(self.at(ix, iq_hi, flavour_position), self.at(ix_hi, iq_hi, flavour_position), tx);
        Ok(lerp(lo_q, hi_q, tq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_subgrid() -> Subgrid {
        //f(x, q) = x + 10 q for flavour 1, twice that for flavour 2
        let xs = vec![0.1, 0.5, 1.0];
        let qs = vec![1.0, 2.0];
        let mut values = Array::zeros((6, 2));
        for (ix, x) in xs.iter().enumerate() {
            for (iq, q) in qs.iter().enumerate() {
                values[[ix * 2 + iq, 0]] = x + 10.0 * q;
                values[[ix * 2 + iq, 1]] = 2.0 * (x + 10.0 * q);
            }
        }
        Subgrid::new(xs, qs, vec![1, 2], values).unwrap()
    }

    #[test]
    fn knots_are_reproduced_exactly() {
        let grid = linear_subgrid();
        assert_eq!(grid.interpolate(1, 0.5, 1.0).unwrap(), 10.5);
        assert_eq!(grid.interpolate(2, 1.0, 2.0).unwrap(), 42.0);
        assert!((grid.interpolate(1, 0.1, 2.0).unwrap() - 20.1).abs() < 1e-12);
    }

    #[test]
    fn scale_is_interpolated_linearly() {
        let grid = linear_subgrid();
        let value = grid.interpolate(1, 0.5, 1.5).unwrap();
        assert!((value - 15.5).abs() < 1e-12);
    }

    #[test]
    fn points_outside_grid_are_errors() {
        let grid = linear_subgrid();
        assert!(grid.interpolate(1, 0.01, 1.0).is_err());
        assert!(grid.interpolate(1, 0.5, 3.0).is_err());
        assert!(grid.interpolate(3, 0.5, 1.0).is_err());
    }

    #[test]
    fn malformed_blocks_are_rejected() {
        let values = Array::zeros((2, 1));
        let bad = vec![Subgrid::new(vec![], vec![1.0, 2.0], vec![21], Array::zeros((0, 1))),
                       Subgrid::new(vec![0.1], vec![], vec![21], Array::zeros((0, 1))),
                       Subgrid::new(vec![0.1, 0.1], vec![1.0], vec![21], values.clone()),
                       Subgrid::new(vec![0.0, 0.1], vec![1.0], vec![21], values.clone()),
                       Subgrid::new(vec![0.1, 0.5], vec![1.0], vec![], Array::zeros((2, 0))),
                       Subgrid::new(vec![0.1, 0.5, 1.0], vec![1.0], vec![21], values.clone()),
                       Subgrid::new(vec![0.1, 0.5], vec![1.0], vec![21, 1], values.clone())];
        for result in bad {
            match result {
                Err(GpPdfError::InvalidGrid(_)) => {},
                other => panic!("unexpected result {:?}", other)
            }
        }
        assert!(Subgrid::new(vec![0.1, 0.5], vec![1.0], vec![21], values).is_ok());
    }
}

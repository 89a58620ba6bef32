extern crate ndarray;

use ndarray::*;

///The (flavour, x) -> vector-index layout shared by every flattened
///mean, covariance and sample. Flavours are the slow index:
///`index = flavour_position * nx + x_position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatLayout {
    pub num_channels : usize,
    pub nx : usize
}

impl FlatLayout {
    pub fn new(num_channels : usize, nx : usize) -> FlatLayout {
        FlatLayout {
            num_channels,
            nx
        }
    }

    pub fn flat_dim(&self) -> usize {
        self.num_channels * self.nx
    }

    pub fn flatten(&self, channel_position : usize, x_position : usize) -> usize {
        channel_position * self.nx + x_position
    }

    ///Inverse of [`FlatLayout::flatten`], returning `(channel_position, x_position)`.
    pub fn unflatten(&self, index : usize) -> (usize, usize) {
        (index / self.nx, index % self.nx)
    }

    ///The contiguous block of `vec` belonging to the flavour at `channel_position`.
    pub fn channel_slice<'a>(&self, vec : ArrayView1<'a, f64>, channel_position : usize) -> ArrayView1<'a, f64> {
        let start = channel_position * self.nx;
        vec.slice_move(s![start..start + self.nx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_unflatten_is_bijective() {
        let layout = FlatLayout::new(5, 7);
        let mut seen = vec![false; layout.flat_dim()];
        for c in 0..5 {
            for x in 0..7 {
                let index = layout.flatten(c, x);
                assert!(!seen[index]);
                seen[index] = true;
                assert_eq!(layout.unflatten(index), (c, x));
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn channel_slice_is_contiguous_block() {
        let layout = FlatLayout::new(3, 2);
        let vec = Array::range(0.0, 6.0, 1.0);
        let slice = layout.channel_slice(vec.view(), 1);
        assert_eq!(slice.to_vec(), vec![2.0, 3.0]);
    }
}

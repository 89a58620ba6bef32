extern crate ndarray;

use ndarray::*;

use crate::coordinate_grid::*;
use crate::ensemble_provider::*;
use crate::error::*;
use crate::flat_index::*;

///Evaluates every (flavour, x) point of every listed replica at scale `q0`.
///The result has one row per flat index and one column per replica.
pub fn sample_ensemble(provider : &dyn EnsembleProvider, channels : &[i32], grid : &CoordinateGrid,
                       q0 : f64, replicas : &[usize]) -> Result<Array2<f64>, GpPdfError> {
    let layout = FlatLayout::new(channels.len(), grid.len());
    let mut ensemble = Array::zeros((layout.flat_dim(), replicas.len()));
    for (column, replica) in replicas.iter().enumerate() {
        for (channel_position, channel) in channels.iter().enumerate() {
            for (x_position, x) in grid.points().iter().enumerate() {
                let value = provider.evaluate(*replica, *channel, *x, q0)?;
                if (!value.is_finite()) {
                    return Err(GpPdfError::ProviderEvaluation {
                        member : *replica,
                        channel : *channel,
                        x : *x,
                        q : q0,
                        reason : format!("non-finite value {}", value)
                    });
                }
                ensemble[[layout.flatten(channel_position, x_position), column]] = value;
            }
        }
    }
    Ok(ensemble)
}

///Mean over columns and unbiased (N - 1) covariance between rows of `ensemble`.
pub fn mean_and_covariance(ensemble : &Array2<f64>) -> Result<(Array1<f64>, Array2<f64>), GpPdfError> {
    let num_replicas = ensemble.shape()[1];
    if (num_replicas < 2) {
        return Err(GpPdfError::InsufficientReplicas { found : num_replicas });
    }
    let mean = ensemble.mean_axis(Axis(1))
                       .ok_or(GpPdfError::InsufficientReplicas { found : num_replicas })?;

    let mut centred = ensemble.clone();
    centred -= &mean.clone().insert_axis(Axis(1));

    let mut covariance = centred.dot(&centred.t());
    covariance /= (num_replicas - 1) as f64;
    Ok((mean, covariance))
}

///Empirical mean and covariance of `provider`'s replicas over the flattened
///(flavour, x) grid at scale `q0`.
pub fn estimate(provider : &dyn EnsembleProvider, channels : &[i32], grid : &CoordinateGrid,
                q0 : f64, replicas : &[usize]) -> Result<(Array1<f64>, Array2<f64>), GpPdfError> {
    if (replicas.len() < 2) {
        return Err(GpPdfError::InsufficientReplicas { found : replicas.len() });
    }
    info!("Sampling {} x-points for {} flavours over {} replicas at initial scale: {} GeV",
          grid.len(), channels.len(), replicas.len(), q0);
    let ensemble = sample_ensemble(provider, channels, grid, q0, replicas)?;
    info!("Computing stats");
    mean_and_covariance(&ensemble)
}

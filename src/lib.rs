//! **G**aussian **P**rocess **PDF**s
//!
//! Takes a prior replica PDF set and uses it to define a Gaussian process.
//! Rather than assuming a covariance function, the covariance of the prior
//! replicas is measured on a fixed x-grid at the initial scale and used directly;
//! the GP mean is the mean over the input replicas. The GP is then sampled and
//! the samples exported as an LHAPDF `lhagrid1` replica set.
//!
//! For starting points on this library, see [`crate::pipeline::Pipeline`] and the
//! [`crate::ensemble_provider::EnsembleProvider`] trait through which prior sets are read.

#![allow(unused_parens)]

#[macro_use] extern crate log;
pub mod params;
pub mod error;
pub mod config;
pub mod coordinate_grid;
pub mod flat_index;
pub mod subgrid;
pub mod ensemble_provider;
pub mod lhagrid_set;
pub mod flavour_selector;
pub mod statistics_estimator;
pub mod linalg_utils;
pub mod covariance_regularizer;
pub mod sqrtm;
pub mod gp_model;
pub mod ensemble_sampler;
pub mod grid_format;
pub mod info_template;
pub mod grid_serializer;
pub mod archive;
pub mod pipeline;
#[cfg(test)]
pub mod test_utils;

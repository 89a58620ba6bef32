use crate::ensemble_provider::*;
use crate::error::*;
use crate::params::*;

///Heavy-quark mass thresholds. The threshold of each heavy flavour is taken
///to be identical to its quark mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassThresholds {
    pub charm : f64,
    pub bottom : f64,
    pub top : f64
}

fn threshold_from(provider : &dyn EnsembleProvider, key : &str) -> Result<f64, GpPdfError> {
    let value = provider.metadata_f64(key)?;
    if (!(value >= 0.0)) {
        return Err(GpPdfError::InvalidMetadata {
            key : key.to_string(),
            value : value.to_string()
        });
    }
    Ok(value)
}

impl MassThresholds {
    pub fn from_provider(provider : &dyn EnsembleProvider) -> Result<MassThresholds, GpPdfError> {
        Ok(MassThresholds {
            charm : threshold_from(provider, "MCharm")?,
            bottom : threshold_from(provider, "MBottom")?,
            top : threshold_from(provider, "MTop")?
        })
    }

    ///The threshold governing `channel`, if it is a heavy flavour.
    pub fn threshold_for(&self, channel : i32) -> Option<f64> {
        match channel.abs() {
            CHARM => Some(self.charm),
            BOTTOM => Some(self.bottom),
            TOP => Some(self.top),
            _ => None
        }
    }
}

///Drops every heavy flavour whose threshold lies above `reference_scale`,
///keeping the declared order of the rest.
pub fn select_active(declared : &[i32], thresholds : &MassThresholds, reference_scale : f64) -> Vec<i32> {
    declared.iter()
            .cloned()
            .filter(|channel| match thresholds.threshold_for(*channel) {
                Some(threshold) => !(threshold > reference_scale),
                None => true
            })
            .collect()
}

///The flavours of `provider` that are active at `reference_scale`.
pub fn select(provider : &dyn EnsembleProvider, reference_scale : f64) -> Result<Vec<i32>, GpPdfError> {
    let declared = provider.declared_channels()?;
    let thresholds = MassThresholds::from_provider(provider)?;
    let active = select_active(&declared, &thresholds, reference_scale);
    if (active.len() != declared.len()) {
        let dropped : Vec<i32> = declared.iter().cloned().filter(|f| !active.contains(f)).collect();
        info!("Flavours {:?} are below threshold at Q = {} and are dropped", dropped, reference_scale);
    }
    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with(mc : &str) -> TabulatedEnsemble {
        let mut ensemble = TabulatedEnsemble::default();
        ensemble.set_metadata("Flavors", "[-5, -4, -3, -2, -1, 21, 1, 2, 3, 4, 5]");
        ensemble.set_metadata("MCharm", mc);
        ensemble.set_metadata("MBottom", "4.92");
        ensemble.set_metadata("MTop", "172.5");
        ensemble
    }

    #[test]
    fn charm_below_threshold_is_dropped() {
        let active = select(&provider_with("1.5"), 1.3).unwrap();
        assert_eq!(active, vec![-3, -2, -1, 21, 1, 2, 3]);
    }

    #[test]
    fn charm_above_threshold_is_kept_in_order() {
        let active = select(&provider_with("1.5"), 1.6).unwrap();
        assert_eq!(active, vec![-4, -3, -2, -1, 21, 1, 2, 3, 4]);
    }

    #[test]
    fn threshold_equal_to_scale_is_active() {
        let thresholds = MassThresholds { charm : 1.5, bottom : 4.5, top : 173.0 };
        assert_eq!(select_active(&[21, 4, -4, 6], &thresholds, 1.5), vec![21, 4, -4]);
    }

    #[test]
    fn light_flavours_and_gluon_are_never_dropped() {
        let thresholds = MassThresholds { charm : 100.0, bottom : 100.0, top : 100.0 };
        let declared = [-6, -5, -4, -3, -2, -1, 21, 1, 2, 3, 4, 5, 6];
        assert_eq!(select_active(&declared, &thresholds, 0.5), vec![-3, -2, -1, 21, 1, 2, 3]);
    }

    #[test]
    fn negative_threshold_is_invalid() {
        assert!(select(&provider_with("-1.0"), 1.6).is_err());
        assert!(select(&provider_with("heavy"), 1.6).is_err());
    }
}

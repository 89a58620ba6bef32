use std::collections::HashMap;

use crate::error::*;
use crate::subgrid::*;

///Parses a flavour list such as `[-3, -2, -1, 1, 2, 3, 21]` or `-3,-2,-1,21`.
pub fn parse_flavour_list(value : &str) -> Result<Vec<i32>, GpPdfError> {
    let trimmed = value.trim().trim_start_matches('[').trim_end_matches(']');
    let mut result = Vec::new();
    for entry in trimmed.split(',') {
        let entry = entry.trim();
        if (entry.is_empty()) {
            continue;
        }
        let flavour = entry.parse::<i32>().map_err(|_| GpPdfError::InvalidMetadata {
            key : String::from("Flavors"),
            value : value.to_string()
        })?;
        result.push(flavour);
    }
    Ok(result)
}

///An ensemble of sampled functions, one per member, each defined for a set
///of flavour channels over a common x domain. Member 0 is by convention the
///central member of the ensemble, members `1..num_members()` are replicas.
pub trait EnsembleProvider {
    fn metadata(&self, key : &str) -> Option<String>;

    fn num_members(&self) -> usize;

    ///Value of `channel` in `member` at coordinate `x` and scale `q`.
    ///Identical calls must return identical values.
    fn evaluate(&self, member : usize, channel : i32, x : f64, q : f64) -> Result<f64, GpPdfError>;

    ///The declared flavour channels, in their declared order.
    fn declared_channels(&self) -> Result<Vec<i32>, GpPdfError> {
        let flavours = self.required_metadata("Flavors")?;
        parse_flavour_list(&flavours)
    }

    fn required_metadata(&self, key : &str) -> Result<String, GpPdfError> {
        self.metadata(key).ok_or_else(|| GpPdfError::MissingMetadata { key : key.to_string() })
    }

    fn metadata_f64(&self, key : &str) -> Result<f64, GpPdfError> {
        let value = self.required_metadata(key)?;
        value.trim().parse::<f64>().map_err(|_| GpPdfError::InvalidMetadata {
            key : key.to_string(),
            value
        })
    }

    ///The members treated as independent replicas, i.e. all but the central one.
    fn replica_indices(&self) -> Vec<usize> {
        (1..self.num_members()).collect()
    }
}

///Evaluates a member made of one or more subgrids, using the first
///subgrid whose scale range contains `q`.
pub fn evaluate_subgrids(subgrids : &[Subgrid], member : usize, channel : i32,
                         x : f64, q : f64) -> Result<f64, GpPdfError> {
    let fail = |reason : String| GpPdfError::ProviderEvaluation {
        member,
        channel,
        x,
        q,
        reason
    };
    let subgrid = subgrids.iter().find(|s| s.contains_scale(q))
                          .ok_or_else(|| fail(String::from("no subgrid contains this scale")))?;
    let value = subgrid.interpolate(channel, x, q).map_err(|reason| fail(reason))?;
    if (!value.is_finite()) {
        return Err(fail(format!("non-finite value {}", value)));
    }
    Ok(value)
}

///An in-memory ensemble: a metadata table plus the subgrids of every member.
#[derive(Clone, Debug, Default)]
pub struct TabulatedEnsemble {
    pub metadata : HashMap<String, String>,
    pub members : Vec<Vec<Subgrid>>
}

impl TabulatedEnsemble {
    pub fn new(metadata : HashMap<String, String>) -> TabulatedEnsemble {
        TabulatedEnsemble {
            metadata,
            members : Vec::new()
        }
    }

    pub fn set_metadata(&mut self, key : &str, value : &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn push_member(&mut self, subgrids : Vec<Subgrid>) {
        self.members.push(subgrids);
    }
}

impl EnsembleProvider for TabulatedEnsemble {
    fn metadata(&self, key : &str) -> Option<String> {
        self.metadata.get(key).cloned()
    }

    fn num_members(&self) -> usize {
        self.members.len()
    }

    fn evaluate(&self, member : usize, channel : i32, x : f64, q : f64) -> Result<f64, GpPdfError> {
        let subgrids = self.members.get(member).ok_or_else(|| GpPdfError::ProviderEvaluation {
            member,
            channel,
            x,
            q,
            reason : format!("ensemble only has {} members", self.members.len())
        })?;
        evaluate_subgrids(subgrids, member, channel, x, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::*;

    #[test]
    fn flavour_lists_parse_with_and_without_brackets() {
        assert_eq!(parse_flavour_list("[-3, -2, -1, 1, 2, 3, 21]").unwrap(),
                   vec![-3, -2, -1, 1, 2, 3, 21]);
        assert_eq!(parse_flavour_list("-4,21,4").unwrap(), vec![-4, 21, 4]);
        assert!(parse_flavour_list("1,g").is_err());
    }

    #[test]
    fn non_finite_values_are_provider_errors() {
        let mut ensemble = TabulatedEnsemble::default();
        let mut values = Array::zeros((2, 1));
        values[[1, 0]] = std::f64::NAN;
        ensemble.push_member(vec![Subgrid::new(vec![0.1, 1.0], vec![1.0], vec![21], values).unwrap()]);
        assert_eq!(ensemble.evaluate(0, 21, 0.1, 1.0).unwrap(), 0.0);
        match ensemble.evaluate(0, 21, 1.0, 1.0) {
            Err(GpPdfError::ProviderEvaluation { member : 0, channel : 21, .. }) => {},
            other => panic!("unexpected result {:?}", other)
        }
        assert!(ensemble.evaluate(1, 21, 0.1, 1.0).is_err());
    }

    #[test]
    fn missing_metadata_is_reported_by_key() {
        let ensemble = TabulatedEnsemble::default();
        match ensemble.metadata_f64("QMin") {
            Err(GpPdfError::MissingMetadata { key }) => assert_eq!(key, "QMin"),
            other => panic!("unexpected result {:?}", other)
        }
    }
}

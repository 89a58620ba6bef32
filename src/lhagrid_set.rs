extern crate ndarray;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ndarray::*;

use crate::ensemble_provider::*;
use crate::error::*;
use crate::params::*;
use crate::subgrid::*;

///A replica set stored on disk in the `lhagrid1` format:
///a directory `<name>/` holding `<name>.info` and `<name>_<iiii>.dat` per member.
///Every member is read eagerly on open. Evaluation interpolates linearly in
///ln(x) and Q (see [`Subgrid`]), not with LHAPDF's log-cubic scheme.
pub struct LhagridSet {
    pub name : String,
    pub directory : PathBuf,
    metadata : HashMap<String, String>,
    members : Vec<Vec<Subgrid>>
}

fn malformed(path : &Path, reason : impl Into<String>) -> GpPdfError {
    GpPdfError::MalformedGridFile {
        path : path.to_path_buf(),
        reason : reason.into()
    }
}

///Parses the `Key: value` lines of an info file. Quoted values are unquoted,
///comments and lines without a key are skipped.
pub fn parse_info(contents : &str) -> HashMap<String, String> {
    let mut result = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if (line.is_empty() || line.starts_with('#')) {
            continue;
        }
        if let Some(colon) = line.find(':') {
            let key = line[..colon].trim();
            let value = line[colon + 1..].trim().trim_matches('"');
            if (!key.is_empty()) {
                result.insert(key.to_string(), value.to_string());
            }
        }
    }
    result
}

fn parse_row<T : std::str::FromStr>(path : &Path, line : &str, what : &str) -> Result<Vec<T>, GpPdfError> {
    line.split_whitespace()
        .map(|token| token.parse::<T>().map_err(|_| malformed(path, format!("bad {} entry `{}`", what, token))))
        .collect()
}

fn parse_subgrid(path : &Path, block : &str) -> Result<Subgrid, GpPdfError> {
    let lines : Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
    if (lines.len() < 3) {
        return Err(malformed(path, "subgrid block is missing its x, Q or flavour line"));
    }
    let xs : Vec<f64> = parse_row(path, lines[0], "x")?;
    let qs : Vec<f64> = parse_row(path, lines[1], "Q")?;
    let flavours : Vec<i32> = parse_row(path, lines[2], "flavour")?;

    let num_rows = xs.len() * qs.len();
    let value_lines = &lines[3..];
    if (value_lines.len() != num_rows) {
        return Err(malformed(path, format!("expected {} value rows, found {}", num_rows, value_lines.len())));
    }
    let mut values = Array::zeros((num_rows, flavours.len()));
    for (row, line) in value_lines.iter().enumerate() {
        let parsed : Vec<f64> = parse_row(path, line, "value")?;
        if (parsed.len() != flavours.len()) {
            return Err(malformed(path, format!("row {} has {} values for {} flavours",
                                               row, parsed.len(), flavours.len())));
        }
        for (column, value) in parsed.into_iter().enumerate() {
            values[[row, column]] = value;
        }
    }
    Subgrid::new(xs, qs, flavours, values).map_err(|e| malformed(path, e.to_string()))
}

///Parses the contents of one member file into its subgrids.
pub fn parse_member(path : &Path, contents : &str) -> Result<Vec<Subgrid>, GpPdfError> {
    let separator = format!("\n{}", BLOCK_SEPARATOR);
    let mut blocks = contents.split(separator.as_str());
    //The first block is the member header
    blocks.next();
    let mut subgrids = Vec::new();
    for block in blocks {
        if (block.trim().is_empty()) {
            continue;
        }
        subgrids.push(parse_subgrid(path, block)?);
    }
    if (subgrids.is_empty()) {
        return Err(malformed(path, "no subgrids"));
    }
    Ok(subgrids)
}

pub fn member_file_name(set_name : &str, member : usize) -> String {
    format!("{}_{:0width$}.dat", set_name, member, width = MEMBER_INDEX_WIDTH)
}

impl LhagridSet {
    pub fn open(directory : impl AsRef<Path>) -> Result<LhagridSet, GpPdfError> {
        let directory = directory.as_ref().to_path_buf();
        let name = directory.file_name()
                            .and_then(|n| n.to_str())
                            .ok_or_else(|| malformed(&directory, "set directory has no usable name"))?
                            .to_string();

        let info_path = directory.join(format!("{}.info", name));
        let metadata = parse_info(&fs::read_to_string(&info_path)?);

        let num_members = match metadata.get("NumMembers") {
            Some(value) => value.parse::<usize>().map_err(|_| GpPdfError::InvalidMetadata {
                key : String::from("NumMembers"),
                value : value.clone()
            })?,
            None => {
                let mut count = 0;
                while directory.join(member_file_name(&name, count)).exists() {
                    count += 1;
                }
                count
            }
        };

        info!("Reading {} members of {}", num_members, name);
        let mut members = Vec::with_capacity(num_members);
        for member in 0..num_members {
            let path = directory.join(member_file_name(&name, member));
            let contents = fs::read_to_string(&path)?;
            members.push(parse_member(&path, &contents)?);
        }

        Ok(LhagridSet {
            name,
            directory,
            metadata,
            members
        })
    }
}

impl EnsembleProvider for LhagridSet {
    fn metadata(&self, key : &str) -> Option<String> {
        self.metadata.get(key).cloned()
    }

    fn num_members(&self) -> usize {
        self.members.len()
    }

    fn evaluate(&self, member : usize, channel : i32, x : f64, q : f64) -> Result<f64, GpPdfError> {
        match self.members.get(member) {
            Some(subgrids) => evaluate_subgrids(subgrids, member, channel, x, q),
            None => Err(GpPdfError::ProviderEvaluation {
                member,
                channel,
                x,
                q,
                reason : format!("{} only has {} members", self.name, self.members.len())
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBER : &str = "PdfType: replica\nFormat: lhagrid1\n---\n\
1.0000000E-01 1.0000000E+00 \n\
1.0000000E+00 2.0000000E+00 \n\
21 1 \n\
1.0 2.0 \n\
3.0 4.0 \n\
5.0 6.0 \n\
7.0 8.0 \n\
---\n\
1.0000000E-01 1.0000000E+00 \n\
2.0000000E+00 1.0000000E+01 \n\
21 1 \n\
9.0 9.0 \n\
9.0 9.0 \n\
9.0 9.0 \n\
9.0 9.0 \n\
---\n";

    #[test]
    fn info_lines_become_metadata() {
        let info = parse_info("SetDesc: \"a set\"\n# comment\nQMin: 1.65\nFlavors: [-1, 21, 1]\n");
        assert_eq!(info.get("SetDesc").unwrap(), "a set");
        assert_eq!(info.get("QMin").unwrap(), "1.65");
        assert_eq!(info.get("Flavors").unwrap(), "[-1, 21, 1]");
    }

    #[test]
    fn member_with_two_subgrids_parses() {
        let subgrids = parse_member(Path::new("test.dat"), MEMBER).unwrap();
        assert_eq!(subgrids.len(), 2);
        assert_eq!(subgrids[0].flavours(), &[21, 1]);
        assert_eq!(subgrids[0].values()[[3, 1]], 8.0);
        assert_eq!(evaluate_subgrids(&subgrids, 0, 1, 1.0, 1.0).unwrap(), 6.0);
        assert_eq!(evaluate_subgrids(&subgrids, 0, 21, 0.1, 5.0).unwrap(), 9.0);
    }

    #[test]
    fn unordered_knots_are_malformed() {
        let unordered = "PdfType: replica\n---\n1.0 0.1 \n1.0 \n21 \n1.0 \n2.0 \n---\n";
        match parse_member(Path::new("bad.dat"), unordered) {
            Err(GpPdfError::MalformedGridFile { reason, .. }) => assert!(reason.contains("increasing")),
            other => panic!("unexpected result {:?}", other.map(|s| s.len()))
        }
    }

    #[test]
    fn truncated_member_is_malformed() {
        let truncated = "PdfType: replica\n---\n0.1 1.0 \n1.0 \n21 \n1.0 \n---\n";
        match parse_member(Path::new("bad.dat"), truncated) {
            Err(GpPdfError::MalformedGridFile { .. }) => {},
            other => panic!("unexpected result {:?}", other.map(|s| s.len()))
        }
    }
}

//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use crate::error::Error;

use log::info;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde_derive::{Deserialize, Serialize};

use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

pub const METHODS: [Method; 3] = [Method::Chained, Method::LinearProbing, Method::RobinHood];
pub const OPERATIONS: [Operation; 3] = [Operation::Insert, Operation::Remove, Operation::Lookup];
pub const OUTCOMES: [Outcome; 2] = [Outcome::Success, Outcome::Failure];

/// Raw load-factor cells carry this prefix, timing cells this suffix.
const ALPHA_PREFIX: &str = "α";
const TIMING_SUFFIX: &str = "ns";

/// A collision-resolution strategy under benchmark.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Chained,
    LinearProbing,
    RobinHood,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::Chained => "Chained Hashing",
            Method::LinearProbing => "Linear Probing",
            Method::RobinHood => "Robin Hood Hashing",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Remove,
    Lookup,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Operation::Insert => "Insert",
            Operation::Remove => "Remove",
            Operation::Lookup => "Lookup",
        };
        write!(f, "{}", name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        };
        write!(f, "{}", name)
    }
}

/// One of the six operation labels, e.g. `Insert (success)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpLabel {
    pub operation: Operation,
    pub outcome: Outcome,
}

impl OpLabel {
    pub fn new(operation: Operation, outcome: Outcome) -> OpLabel {
        OpLabel { operation, outcome }
    }
}

impl fmt::Display for OpLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.operation, self.outcome)
    }
}

impl FromStr for OpLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<OpLabel, Error> {
        for &operation in &OPERATIONS {
            for &outcome in &OUTCOMES {
                let label = OpLabel::new(operation, outcome);
                if label.to_string() == s {
                    return Ok(label);
                }
            }
        }
        Err(Error::UnknownLabel(s.to_string()))
    }
}

impl serde::Serialize for OpLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for OpLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<OpLabel, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One normalized benchmark row: a load factor, an operation label,
/// and the per-method timings in nanoseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub alpha: f64,
    pub operation: OpLabel,
    #[serde(rename = "Chained Hashing")]
    pub chained: f64,
    #[serde(rename = "Linear Probing")]
    pub linear: f64,
    #[serde(rename = "Robin Hood Hashing")]
    pub robin_hood: f64,
}

impl Record {
    pub fn timing(&self, method: Method) -> f64 {
        match method {
            Method::Chained => self.chained,
            Method::LinearProbing => self.linear,
            Method::RobinHood => self.robin_hood,
        }
    }
}

/// The normalized benchmark table.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Table {
        Table { records }
    }

    /// Cache-or-parse: reload the normalized CSV if it exists, otherwise
    /// normalize raw pasted text from stdin and persist the cache.
    pub fn load(path: &Path) -> Result<Table, Error> {
        if path.exists() {
            let table = Table::from_cache(path)?;
            info!("normalized data loaded from {}", path.display());
            Ok(table)
        } else {
            info!(
                "no cache at {}, reading raw table from stdin",
                path.display()
            );
            let stdin = std::io::stdin();
            let table = Table::normalize(stdin.lock())?;
            table.write_cache(path)?;
            info!("normalized data saved to {}", path.display());
            Ok(table)
        }
    }

    /// Normalizes raw whitespace-separated rows:
    /// forward-fills the sparse `α = <value>` column, strips the prefix,
    /// strips `ns` suffixes, and validates the operation labels.
    pub fn normalize(reader: impl BufRead) -> Result<Table, Error> {
        let mut records = Vec::new();
        let mut last_alpha = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            let (alpha, rest) = if tokens[0] == ALPHA_PREFIX {
                if tokens.len() < 3 || tokens[1] != "=" {
                    return Err(Error::BadAlpha {
                        line: number,
                        cell: line.trim().to_string(),
                    });
                }
                let value = tokens[2].parse().map_err(|_| Error::BadAlpha {
                    line: number,
                    cell: tokens[2].to_string(),
                })?;
                last_alpha = Some(value);
                (value, &tokens[3..])
            } else {
                match last_alpha {
                    Some(value) => (value, &tokens[..]),
                    None => return Err(Error::MissingAlpha { line: number }),
                }
            };

            // operation label plus one timing per method
            if rest.len() != 2 + METHODS.len() {
                return Err(Error::ShortRow {
                    line: number,
                    expected: 2 + METHODS.len(),
                });
            }

            let operation: OpLabel = format!("{} {}", rest[0], rest[1]).parse()?;

            records.push(Record {
                alpha,
                operation,
                chained: parse_timing(rest[2], number)?,
                linear: parse_timing(rest[3], number)?,
                robin_hood: parse_timing(rest[4], number)?,
            });
        }

        if records.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Table { records })
    }

    pub fn from_cache(path: &Path) -> Result<Table, Error> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            records.push(result?);
        }
        if records.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Table { records })
    }

    pub fn write_cache(&self, path: &Path) -> Result<(), Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct load factors, ascending.
    pub fn alphas(&self) -> Vec<f64> {
        let mut alphas: Vec<f64> = Vec::new();
        for record in &self.records {
            if !alphas.iter().any(|a| (a - record.alpha).abs() < f64::EPSILON) {
                alphas.push(record.alpha);
            }
        }
        alphas.sort_by(|x, y| x.partial_cmp(y).unwrap());
        alphas
    }

    /// The (alpha, timing) points for one method and operation outcome,
    /// ordered by load factor.
    pub fn series(&self, method: Method, operation: Operation, outcome: Outcome) -> Vec<(f64, f64)> {
        let label = OpLabel::new(operation, outcome);
        let mut points: Vec<(f64, f64)> = self
            .records
            .iter()
            .filter(|record| record.operation == label)
            .map(|record| (record.alpha, record.timing(method)))
            .collect();
        points.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap());
        points
    }
}

fn parse_timing(cell: &str, line: usize) -> Result<f64, Error> {
    let stripped = cell.strip_suffix(TIMING_SUFFIX).unwrap_or(cell);
    stripped.parse().map_err(|_| Error::BadTiming {
        line,
        cell: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::io::Cursor;

    const RAW: &str = "\
α = 0.5\tInsert (success)\t93.2ns\t59.6ns\t62.2ns
\tInsert (failure)\t101.3ns\t68.2ns\t65.1ns
\tRemove (success)\t97.4ns\t61.0ns\t63.8ns
\tRemove (failure)\t103.9ns\t70.5ns\t66.9ns
\tLookup (success)\t95.1ns\t58.3ns\t61.4ns
\tLookup (failure)\t99.8ns\t66.7ns\t64.2ns
";

    const RAW_TWO_GROUPS: &str = "\
α = 0.5 Insert (success) 93.2ns 59.6ns 62.2ns
Insert (failure) 101.3ns 68.2ns 65.1ns
α = 0.7 Insert (success) 121.5ns 88.1ns 79.4ns
Insert (failure) 130.0ns 97.3ns 84.6ns
";

    fn normalize(raw: &str) -> Result<Table, Error> {
        Table::normalize(Cursor::new(raw))
    }

    #[test]
    fn normalize_sample() {
        let table = normalize(RAW).unwrap();
        assert_eq!(table.len(), 6);

        let first = &table.records()[0];
        assert_eq!(first.alpha, 0.5);
        assert_eq!(
            first.operation,
            OpLabel::new(Operation::Insert, Outcome::Success)
        );
        assert_eq!(first.chained, 93.2);
        assert_eq!(first.linear, 59.6);
        assert_eq!(first.robin_hood, 62.2);

        let last = &table.records()[5];
        assert_eq!(
            last.operation,
            OpLabel::new(Operation::Lookup, Outcome::Failure)
        );
        assert_eq!(last.robin_hood, 64.2);
    }

    #[test]
    fn alpha_forward_fill() {
        let table = normalize(RAW_TWO_GROUPS).unwrap();
        let alphas: Vec<f64> = table.records().iter().map(|r| r.alpha).collect();
        assert_eq!(alphas, vec![0.5, 0.5, 0.7, 0.7]);
        assert_eq!(table.alphas(), vec![0.5, 0.7]);
    }

    #[test]
    fn labels_partition_six_ways() {
        let table = normalize(RAW).unwrap();
        let labels: HashSet<OpLabel> =
            table.records().iter().map(|r| r.operation).collect();
        assert_eq!(labels.len(), 6);
        for &operation in &OPERATIONS {
            for &outcome in &OUTCOMES {
                assert!(labels.contains(&OpLabel::new(operation, outcome)));
            }
        }
    }

    #[test]
    fn label_round_trip() {
        for &operation in &OPERATIONS {
            for &outcome in &OUTCOMES {
                let label = OpLabel::new(operation, outcome);
                let parsed: OpLabel = label.to_string().parse().unwrap();
                assert_eq!(parsed, label);
            }
        }
        assert!(matches!(
            "Frobnicate (success)".parse::<OpLabel>(),
            Err(Error::UnknownLabel(_))
        ));
        assert!(matches!(
            "Insert (sometimes)".parse::<OpLabel>(),
            Err(Error::UnknownLabel(_))
        ));
    }

    #[test]
    fn timing_suffix_stripped() {
        assert_eq!(parse_timing("93.2ns", 1).unwrap(), 93.2);
        assert_eq!(parse_timing("100", 1).unwrap(), 100.0);
        assert!(matches!(
            parse_timing("fastns", 1),
            Err(Error::BadTiming { line: 1, .. })
        ));
    }

    #[test]
    fn missing_alpha_on_first_row() {
        let raw = "Insert (success) 1.0ns 2.0ns 3.0ns\n";
        assert!(matches!(
            normalize(raw),
            Err(Error::MissingAlpha { line: 1 })
        ));
    }

    #[test]
    fn malformed_alpha_cell() {
        let raw = "α = fast Insert (success) 1.0ns 2.0ns 3.0ns\n";
        assert!(matches!(normalize(raw), Err(Error::BadAlpha { line: 1, .. })));
    }

    #[test]
    fn short_row() {
        let raw = "α = 0.5 Insert (success) 1.0ns 2.0ns\n";
        assert!(matches!(
            normalize(raw),
            Err(Error::ShortRow {
                line: 1,
                expected: 5
            })
        ));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(normalize(""), Err(Error::EmptyInput)));
        assert!(matches!(normalize("\n  \n"), Err(Error::EmptyInput)));
    }

    #[test]
    fn cache_round_trip_is_idempotent() {
        let table = normalize(RAW).unwrap();
        let path = std::env::temp_dir().join(format!(
            "hash_perf_cache_{}.csv",
            std::process::id()
        ));
        table.write_cache(&path).unwrap();
        let reloaded = Table::from_cache(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn cache_header_names_methods() {
        let table = normalize(RAW).unwrap();
        let path = std::env::temp_dir().join(format!(
            "hash_perf_header_{}.csv",
            std::process::id()
        ));
        table.write_cache(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "alpha,operation,Chained Hashing,Linear Probing,Robin Hood Hashing"
        );
        assert!(!content.contains("ns,"));
        assert!(!content.contains("α"));
    }

    #[test]
    fn series_selection() {
        let table = normalize(RAW_TWO_GROUPS).unwrap();
        let points = table.series(Method::Chained, Operation::Insert, Outcome::Success);
        assert_eq!(points, vec![(0.5, 93.2), (0.7, 121.5)]);
        let points = table.series(Method::RobinHood, Operation::Insert, Outcome::Failure);
        assert_eq!(points, vec![(0.5, 65.1), (0.7, 84.6)]);
        assert!(table
            .series(Method::Chained, Operation::Remove, Outcome::Success)
            .is_empty());
    }
}

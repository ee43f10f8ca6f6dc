use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One parsed input line: an ordered list of string fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Customer count for a single email domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: u64,
}

/// Domain -> customer count, built during one run.
pub type DomainTable = HashMap<String, u64>;

/// The final, deterministically ordered report.
pub type Report = Vec<DomainCount>;

/// Ordering contract for the report. Both orders appear in the wild, so the
/// choice is an explicit, named policy rather than an implementation detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// Ascending lexicographic order by domain name (default).
    #[default]
    DomainAscending,
    /// Descending by count; ties resolve ascending by domain name.
    CountDescending,
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortPolicy::DomainAscending => "domain-ascending",
            SortPolicy::CountDescending => "count-descending",
        };
        f.write_str(name)
    }
}

impl FromStr for SortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain-ascending" => Ok(SortPolicy::DomainAscending),
            "count-descending" => Ok(SortPolicy::CountDescending),
            other => Err(format!(
                "unknown sort policy '{}', expected 'domain-ascending' or 'count-descending'",
                other
            )),
        }
    }
}

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::Date;

/// One security position extracted from an NPORT-P document.
///
/// Duplicates from the source document are preserved; there is no
/// identity or uniqueness constraint across holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub cusip: String,
    pub title: String,
    pub balance: f64,
    pub value_usd: f64,
}

impl Holding {
    /// Build a holding from optional raw document fields, applying the
    /// documented defaults for anything absent or unparseable.
    pub fn from_fields(
        cusip: Option<String>,
        title: Option<String>,
        balance: Option<String>,
        value_usd: Option<String>,
    ) -> Self {
        Self {
            cusip: cusip.unwrap_or_else(|| String::from("N/A")),
            title: title.unwrap_or_else(|| String::from("N/A")),
            balance: parse_numeric(balance),
            value_usd: parse_numeric(value_usd),
        }
    }
}

fn parse_numeric(raw: Option<String>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Holdings ordering requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Descending market value in USD. Default.
    Value,
    /// Descending share/par balance.
    Balance,
    /// Ascending security title.
    Title,
}

impl SortKey {
    /// Map a raw request parameter to a sort key. Unrecognized or empty
    /// values fall back to [`SortKey::Value`].
    pub fn from_param(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "balance" => Self::Balance,
            "title" => Self::Title,
            _ => Self::Value,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Balance => "balance",
            Self::Title => "title",
        }
    }

    /// Stable in-place sort; equal keys keep document order.
    pub fn sort(self, holdings: &mut [Holding]) {
        match self {
            Self::Value => holdings.sort_by(|a, b| descending(a.value_usd, b.value_usd)),
            Self::Balance => holdings.sort_by(|a, b| descending(a.balance, b.balance)),
            Self::Title => holdings.sort_by(|a, b| a.title.cmp(&b.title)),
        }
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a registrant's recent-filings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingReference {
    pub accession_number: String,
    pub form_type: String,
    /// ISO date string; lexicographic comparison is chronological.
    pub filing_date: String,
}

/// Fully qualified URL of the structured document inside a filing's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLocation(pub String);

impl DocumentLocation {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final outcome of one lookup, shaped for rendering.
///
/// After a completed pipeline run exactly one of `holdings`/`error` is
/// populated. `fund_name` carries whatever display name was recovered
/// before a failure, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    pub holdings: Option<Vec<Holding>>,
    pub error: Option<String>,
    pub fund_name: String,
    pub as_of: Date,
}

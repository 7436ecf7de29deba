use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CIK_WIDTH: usize = 10;

/// Validation errors for registrant identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CikError {
    #[error("CIK cannot be empty")]
    Empty,
    #[error("CIK contains non-digit character '{ch}' at index {index}")]
    NonDigit { ch: char, index: usize },
    #[error("CIK length {len} exceeds {CIK_WIDTH} digits")]
    TooLong { len: usize },
}

/// Canonical SEC registrant number: exactly 10 ASCII digits, zero-padded.
///
/// Input may carry surrounding whitespace and an optional case-insensitive
/// `CIK` prefix; both are stripped before validation. Canonicalization is
/// idempotent: parsing an already-canonical value returns it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cik(String);

impl Cik {
    pub fn parse(input: &str) -> Result<Self, CikError> {
        let trimmed = input.trim();
        let digits = strip_prefix_ci(trimmed, "CIK").trim();

        if digits.is_empty() {
            return Err(CikError::Empty);
        }

        let len = digits.chars().count();
        if len > CIK_WIDTH {
            return Err(CikError::TooLong { len });
        }

        for (index, ch) in digits.chars().enumerate() {
            if !ch.is_ascii_digit() {
                return Err(CikError::NonDigit { ch, index });
            }
        }

        Ok(Self(format!("{digits:0>width$}", width = CIK_WIDTH)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn strip_prefix_ci<'a>(input: &'a str, prefix: &str) -> &'a str {
    match input.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &input[prefix.len()..],
        _ => input,
    }
}

impl Display for Cik {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Cik {
    type Error = CikError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Cik {
    type Error = CikError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Cik> for String {
    fn from(value: Cik) -> Self {
        value.0
    }
}

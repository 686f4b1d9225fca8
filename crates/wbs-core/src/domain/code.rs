//! WBS Code
//!
//! Dotted numeric codes (`1`, `2.1`, `2.10.3`) with segment-wise ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a string is not a usable WBS code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("WBS code is empty")]
    Empty,
    #[error("WBS code {code:?} has a non-numeric segment {segment:?}")]
    InvalidSegment { code: String, segment: String },
}

/// A parsed dotted numeric code.
///
/// Ordering compares segments as integers left to right; when all shared
/// segments are equal the shorter code sorts first (`2` < `2.1`). Codes with
/// equal numeric value but different spelling (`1` vs `01`) fall back to the
/// raw text so the order stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WbsCode {
    raw: String,
    segments: Vec<u64>,
}

impl WbsCode {
    pub fn parse(input: &str) -> Result<Self, CodeError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(CodeError::Empty);
        }

        let segments = raw
            .split('.')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(CodeError::InvalidSegment {
                        code: raw.to_string(),
                        segment: segment.to_string(),
                    });
                }
                segment.parse::<u64>().map_err(|_| CodeError::InvalidSegment {
                    code: raw.to_string(),
                    segment: segment.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Number of dotted segments (`2.1.3` has 3)
    pub fn level(&self) -> usize {
        self.segments.len()
    }
}

impl Ord for WbsCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments
            .cmp(&other.segments)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for WbsCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for WbsCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WbsCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WbsCode> for String {
    fn from(code: WbsCode) -> Self {
        code.raw
    }
}

impl fmt::Display for WbsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> WbsCode {
        WbsCode::parse(s).unwrap()
    }

    #[test]
    fn test_parse_segments() {
        let c = code("2.10.3");
        assert_eq!(c.segments(), &[2, 10, 3]);
        assert_eq!(c.level(), 3);
        assert_eq!(c.as_str(), "2.10.3");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(code("  1.2 ").as_str(), "1.2");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(WbsCode::parse(""), Err(CodeError::Empty));
        assert_eq!(WbsCode::parse("   "), Err(CodeError::Empty));
        assert!(matches!(WbsCode::parse("2."), Err(CodeError::InvalidSegment { .. })));
        assert!(matches!(WbsCode::parse("A.1"), Err(CodeError::InvalidSegment { .. })));
        assert!(matches!(WbsCode::parse("1..2"), Err(CodeError::InvalidSegment { .. })));
        assert!(matches!(WbsCode::parse("+1"), Err(CodeError::InvalidSegment { .. })));
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert!(code("2.9") < code("2.10"));
        assert!(code("10") > code("9"));
    }

    #[test]
    fn test_shorter_prefix_sorts_first() {
        assert!(code("2") < code("2.1"));
        assert!(code("2.1") < code("2.1.1"));
        assert!(code("2.1.5") < code("2.2"));
    }

    #[test]
    fn test_sort_example() {
        let mut codes = vec![code("2.10"), code("2.2"), code("2.1")];
        codes.sort();
        let sorted: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(sorted, vec!["2.1", "2.2", "2.10"]);
    }

    #[test]
    fn test_leading_zero_order_is_total() {
        assert_ne!(code("01"), code("1"));
        assert_ne!(code("01").cmp(&code("1")), Ordering::Equal);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&code("1.2")).unwrap();
        assert_eq!(json, "\"1.2\"");
        let back: WbsCode = serde_json::from_str("\"3.4\"").unwrap();
        assert_eq!(back, code("3.4"));
        assert!(serde_json::from_str::<WbsCode>("\"x\"").is_err());
    }
}

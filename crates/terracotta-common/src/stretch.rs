//! Value stretch ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClientError, ClientResult};

/// The `[low, high]` value interval mapped linearly onto a colormap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct StretchRange {
    low: f64,
    high: f64,
}

impl StretchRange {
    /// Create a stretch range, rejecting non-finite bounds and `low > high`.
    pub fn new(low: f64, high: f64) -> ClientResult<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ClientError::Config(
                "stretch range bounds must be finite numbers".to_string(),
            ));
        }
        if low > high {
            return Err(ClientError::Config(format!(
                "stretch range low {} exceeds high {}",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    /// Parse a "low,high" pair.
    pub fn parse(s: &str) -> ClientResult<Self> {
        let (low, high) = s
            .split_once(',')
            .ok_or_else(|| ClientError::Config(format!("expected 'low,high', got '{}'", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ClientError::Config(format!("invalid stretch bound '{}'", v)))
        };
        Self::new(parse(low)?, parse(high)?)
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// JSON array form used as the `stretch_range` query value, e.g. `[0,233.1878]`.
    pub fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl Default for StretchRange {
    fn default() -> Self {
        Self { low: 0.0, high: 1.0 }
    }
}

// Display for f64 prints integral values without a fractional part,
// which matches the JSON the tile server expects.
impl fmt::Display for StretchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.low, self.high)
    }
}

impl TryFrom<[f64; 2]> for StretchRange {
    type Error = ClientError;

    fn try_from(v: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(v[0], v[1])
    }
}

impl From<StretchRange> for [f64; 2] {
    fn from(r: StretchRange) -> Self {
        [r.low, r.high]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value_formatting() {
        assert_eq!(StretchRange::default().to_query_value(), "[0,1]");
        assert_eq!(
            StretchRange::new(0.0, 233.1878).unwrap().to_query_value(),
            "[0,233.1878]"
        );
        assert_eq!(
            StretchRange::new(-1.5, 2.0).unwrap().to_query_value(),
            "[-1.5,2]"
        );
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert!(StretchRange::new(2.0, 1.0).is_err());
        assert!(StretchRange::new(f64::NAN, 1.0).is_err());
        assert!(StretchRange::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_parse() {
        let r = StretchRange::parse("10, 20.5").unwrap();
        assert_eq!(r.low(), 10.0);
        assert_eq!(r.high(), 20.5);
        assert!(StretchRange::parse("10").is_err());
        assert!(StretchRange::parse("a,b").is_err());
    }

    #[test]
    fn test_rejects_infinite_bounds() {
        assert!(StretchRange::new(0.0, f64::INFINITY).is_err());
        assert!(StretchRange::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(StretchRange::parse("0,inf").is_err());
    }

    #[test]
    fn test_query_value_is_json() {
        let r = StretchRange::parse("-0.5,233.1878").unwrap();
        let parsed: Vec<f64> = serde_json::from_str(&r.to_query_value()).unwrap();
        assert_eq!(parsed, vec![-0.5, 233.1878]);
    }
}

//! Scale factor newtype with validation
//!
//! A [`Scale`] is a positive magnification factor relative to a node's base
//! size, rounded to two decimal places. Equality, ordering and hashing all go
//! through the rounded value in hundredths, so `1.5` and `1.500001` are the
//! same scale.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Largest accepted scale: a one-pixel node rendered at the WebP size limit
pub const MAX_SCALE: f64 = 16_383.0;

/// Image magnification factor
///
/// # Examples
///
/// ```
/// use webp_exporter::domain::Scale;
///
/// let scale = Scale::new(1.5).unwrap();
/// assert_eq!(scale.to_string(), "1.5");
/// assert_eq!(scale.file_token(), "1_5x");
/// assert!(Scale::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Scale(f64);

impl Scale {
    /// Creates a new Scale, rounding to two decimal places
    ///
    /// # Returns
    ///
    /// Returns `Err` if the value is not finite, rounds to zero or below, or
    /// exceeds [`MAX_SCALE`]
    pub fn new(value: f64) -> Result<Self, String> {
        if !value.is_finite() {
            return Err(format!("Scale must be a finite number, got {value}"));
        }
        let rounded = (value * 100.0).round() / 100.0;
        if rounded <= 0.0 {
            return Err(format!("Scale must be greater than zero, got {value}"));
        }
        if rounded > MAX_SCALE {
            return Err(format!("Scale must be at most {MAX_SCALE}, got {value}"));
        }
        Ok(Self(rounded))
    }

    /// Scale of exactly `n`, kept within 1..=[`MAX_SCALE`]
    pub fn whole(n: u32) -> Self {
        Self(f64::from(n.clamp(1, MAX_SCALE as u32)))
    }

    /// Returns the scale as a float
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the scale in hundredths, the unit used for comparisons
    pub fn hundredths(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    /// Whether this scale has no fractional part
    pub fn is_integral(self) -> bool {
        self.hundredths() % 100 == 0
    }

    /// Scale written with an `x` suffix and `.` replaced by `_`, e.g. `1_5x`
    pub fn file_token(self) -> String {
        format!("{}x", self.0.to_string().replace('.', "_"))
    }

    /// Scale written with an `x` suffix, e.g. `1.5x`
    pub fn label(self) -> String {
        format!("{}x", self.0)
    }
}

impl PartialEq for Scale {
    fn eq(&self, other: &Self) -> bool {
        self.hundredths() == other.hundredths()
    }
}

impl Eq for Scale {}

impl Hash for Scale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hundredths().hash(state);
    }
}

impl PartialOrd for Scale {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scale {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hundredths().cmp(&other.hundredths())
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Scale {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Scale> for f64 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

impl FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("Not a number: '{s}'"))?;
        Self::new(value)
    }
}

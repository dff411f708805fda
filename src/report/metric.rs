//! A numeric metric that may not be available for a given pipeline.

use std::fmt;

use serde::Serialize;
use serde::Serializer;

/// The marker rendered in place of a metric that is not available.
pub const UNAVAILABLE: &str = "Unavailable";

/// A single numeric cell within a report.
///
/// Some pipelines structurally cannot supply certain metrics (for example,
/// Kallisto never reports uniquely aligned reads). Rather than a silent zero,
/// those cells hold [`Metric::Unavailable`], which renders as
/// [`UNAVAILABLE`] and poisons any arithmetic it participates in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Metric {
    /// A known value.
    Value(f64),

    /// The value is not available.
    #[default]
    Unavailable,
}

impl Metric {
    /// Gets the inner value, if it is available.
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::Unavailable => None,
        }
    }

    /// Whether or not this metric holds a value.
    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Value(_))
    }

    /// Computes `100 × self / denominator`.
    ///
    /// The result is [`Metric::Unavailable`] if either operand is unavailable
    /// or the denominator is zero.
    pub fn percent_of(&self, denominator: Metric) -> Metric {
        match (self, denominator) {
            (Metric::Value(n), Metric::Value(d)) if d != 0.0 => Metric::Value(n / d * 100.0),
            _ => Metric::Unavailable,
        }
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        value.map(Metric::Value).unwrap_or_default()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{}", v),
            Metric::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Metric::Value(v) => serializer.serialize_f64(*v),
            Metric::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

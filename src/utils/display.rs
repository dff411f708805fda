//! Utilities related to displaying things.

use std::fmt;

use num_format::Locale;
use num_format::ToFormattedString;

use crate::report::Metric;

/// Utility struct for displaying a count with thousands separators. Counts
/// with a fractional part are displayed to two decimal places.
pub struct CountFormat(pub Metric);

impl fmt::Display for CountFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Metric::Value(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => {
                f.write_str(&(v as u64).to_formatted_string(&Locale::en))
            }
            Metric::Value(v) => write!(f, "{:.2}", v),
            Metric::Unavailable => write!(f, "{}", Metric::Unavailable),
        }
    }
}

/// Utility struct for displaying a percentage to two decimal places.
pub struct PercentageFormat(pub Metric);

impl fmt::Display for PercentageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Metric::Value(v) => write!(f, "{:.2}%", v),
            Metric::Unavailable => write!(f, "{}", Metric::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_format() {
        assert_eq!(
            CountFormat(Metric::Value(32_389_200.0)).to_string(),
            "32,389,200"
        );
        assert_eq!(CountFormat(Metric::Value(1.5)).to_string(), "1.50");
        assert_eq!(CountFormat(Metric::Unavailable).to_string(), "Unavailable");
    }

    #[test]
    fn test_percentage_format() {
        assert_eq!(
            PercentageFormat(Metric::Value(88.589_123)).to_string(),
            "88.59%"
        );
        assert_eq!(
            PercentageFormat(Metric::Unavailable).to_string(),
            "Unavailable"
        );
    }
}

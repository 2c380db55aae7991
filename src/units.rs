//! Unit systems, dimension parsing, and dimension label formatting.
//!
//! Plan coordinates are feet for imperial plans and meters for metric plans.
//! Dimension strings accept a small grammar: `12ft`, `12ft 6in`, `4ft 3-1/2in`,
//! `6'`, `3.5m`, `900mm`, `45cm`, or a bare number in plan units.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::math::{CLUSTER_EPSILON_FT, CLUSTER_EPSILON_M};

const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_INCH: f64 = 0.0254;

/// The measurement system of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    /// Converts a length in inches into plan units.
    #[must_use]
    pub fn from_inches(self, inches: f64) -> f64 {
        match self {
            Self::Imperial => inches / 12.0,
            Self::Metric => inches * METERS_PER_INCH,
        }
    }

    /// Converts a length in meters into plan units.
    #[must_use]
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            Self::Imperial => meters / METERS_PER_FOOT,
            Self::Metric => meters,
        }
    }

    /// Largest gap between two facing room edges that still counts as one
    /// shared wall (about one foot).
    #[must_use]
    pub fn max_shared_gap(self) -> f64 {
        match self {
            Self::Imperial => 1.0,
            Self::Metric => 0.3,
        }
    }

    /// Perpendicular tolerance for clustering collinear building edges.
    #[must_use]
    pub fn cluster_epsilon(self) -> f64 {
        match self {
            Self::Imperial => CLUSTER_EPSILON_FT,
            Self::Metric => CLUSTER_EPSILON_M,
        }
    }

    /// Distance between stacked dimension lanes.
    #[must_use]
    pub fn dimension_lane_spacing(self) -> f64 {
        match self {
            Self::Imperial => 2.0,
            Self::Metric => 0.6,
        }
    }

    /// Rendering scale assumed when estimating whether a label fits.
    #[must_use]
    pub fn pixels_per_unit(self) -> f64 {
        match self {
            Self::Imperial => 40.0,
            Self::Metric => 40.0 / METERS_PER_FOOT,
        }
    }
}

/// A length as written in the configuration: a number or a dimension string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(f64),
    Text(String),
}

impl Dimension {
    /// Resolves the value into plan units.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDimension` when the string does not parse.
    pub fn resolve(&self, units: UnitSystem) -> Result<f64, ConfigError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => parse_dimension(text, units),
        }
    }

    /// Returns `true` for the literal keyword (case-insensitive).
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::Text(text) if text.trim().eq_ignore_ascii_case(keyword))
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Parses a dimension string into plan units.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDimension` describing the first bad token.
pub fn parse_dimension(input: &str, units: UnitSystem) -> Result<f64, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDimension {
        input: input.to_owned(),
        reason: reason.to_owned(),
    };

    let text = input.trim();
    if text.is_empty() {
        return Err(invalid("empty dimension"));
    }
    if let Ok(value) = text.parse::<f64>() {
        return Ok(value);
    }

    let (negative, mut rest) = match text.strip_prefix('-') {
        Some(stripped) => (true, stripped.trim_start()),
        None => (false, text),
    };

    let mut total = 0.0;
    let mut terms = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '/'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid("expected a number"));
        }
        let value = parse_mixed_number(&rest[..number_len]).ok_or_else(|| invalid("bad number"))?;
        rest = rest[number_len..].trim_start();

        let unit_len = rest
            .find(|c: char| !(c.is_ascii_alphabetic() || c == '\'' || c == '"'))
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        total += match unit {
            "ft" | "'" => units.from_inches(value * 12.0),
            "in" | "\"" => units.from_inches(value),
            "m" => units.from_meters(value),
            "cm" => units.from_meters(value / 100.0),
            "mm" => units.from_meters(value / 1000.0),
            "" => return Err(invalid("missing unit")),
            _ => return Err(invalid("unknown unit")),
        };
        terms += 1;
        rest = rest[unit_len..].trim_start();
    }

    if terms == 0 {
        return Err(invalid("no value"));
    }
    Ok(if negative { -total } else { total })
}

/// Parses `3`, `3.5`, `1/2`, or `3-1/2`.
fn parse_mixed_number(token: &str) -> Option<f64> {
    if let Some((whole, fraction)) = token.split_once('-') {
        return Some(whole.parse::<f64>().ok()? + parse_fraction(fraction)?);
    }
    if token.contains('/') {
        return parse_fraction(token);
    }
    token.parse().ok()
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (num, den) = token.split_once('/')?;
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    (den != 0.0).then(|| num / den)
}

/// Formats a length for a dimension label.
///
/// Imperial values render as feet and inches rounded to the nearest eighth
/// (`12'-6"`, `4'-3 1/2"`, or `6 1/2"` under a foot); metric values render in
/// meters with two decimals (`3.50m`).
#[must_use]
pub fn format_dimension(value: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{value:.2}m"),
        UnitSystem::Imperial => format_feet_inches(value),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_feet_inches(feet: f64) -> String {
    let sign = if feet < 0.0 { "-" } else { "" };
    let eighths = (feet.abs() * 12.0 * 8.0).round() as i64;
    let whole_feet = eighths / (12 * 8);
    let rem = eighths % (12 * 8);
    let inches = rem / 8;
    let mut numerator = rem % 8;
    let mut denominator = 8;
    while numerator != 0 && numerator % 2 == 0 {
        numerator /= 2;
        denominator /= 2;
    }
    let inch_text = if numerator == 0 {
        format!("{inches}")
    } else if inches == 0 && whole_feet == 0 {
        format!("{numerator}/{denominator}")
    } else {
        format!("{inches} {numerator}/{denominator}")
    };
    if whole_feet == 0 {
        format!("{sign}{inch_text}\"")
    } else {
        format!("{sign}{whole_feet}'-{inch_text}\"")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parses_imperial_grammar() {
        let u = UnitSystem::Imperial;
        assert_abs_diff_eq!(parse_dimension("12ft", u).unwrap(), 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(parse_dimension("12ft 6in", u).unwrap(), 12.5, epsilon = 1e-9);
        assert_abs_diff_eq!(
            parse_dimension("4ft 3-1/2in", u).unwrap(),
            4.0 + 3.5 / 12.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(parse_dimension("2ft 4in", u).unwrap(), 28.0 / 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(parse_dimension("7.5", u).unwrap(), 7.5, epsilon = 1e-9);
        assert_abs_diff_eq!(parse_dimension("6'", u).unwrap(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn parses_metric_grammar() {
        let u = UnitSystem::Metric;
        assert_abs_diff_eq!(parse_dimension("3.5m", u).unwrap(), 3.5, epsilon = 1e-9);
        assert_abs_diff_eq!(parse_dimension("900mm", u).unwrap(), 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_dimension("45cm", u).unwrap(), 0.45, epsilon = 1e-12);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_dimension("twelve feet", UnitSystem::Imperial).is_err());
        assert!(parse_dimension("12 parsecs", UnitSystem::Imperial).is_err());
        assert!(parse_dimension("", UnitSystem::Imperial).is_err());
        assert!(parse_dimension("12", UnitSystem::Metric).is_ok());
    }

    #[test]
    fn formats_feet_and_inches() {
        assert_eq!(format_dimension(12.5, UnitSystem::Imperial), "12'-6\"");
        assert_eq!(format_dimension(12.0, UnitSystem::Imperial), "12'-0\"");
        assert_eq!(format_dimension(6.5 / 12.0, UnitSystem::Imperial), "6 1/2\"");
        assert_eq!(format_dimension(4.0 + 3.5 / 12.0, UnitSystem::Imperial), "4'-3 1/2\"");
    }

    #[test]
    fn formats_meters() {
        assert_eq!(format_dimension(3.5, UnitSystem::Metric), "3.50m");
    }

    #[test]
    fn dimension_keyword() {
        assert!(Dimension::Text("Full".into()).is_keyword("full"));
        assert!(!Dimension::Number(3.0).is_keyword("full"));
    }
}

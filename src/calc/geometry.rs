//! Tyre geometry calculator
//!
//! Derives rolling geometry from a metric tyre size and searches for
//! dimensionally equivalent alternative sizes on the same rim. All
//! arithmetic is in millimetres unless a field name says otherwise.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Millimetres per kilometre
const MM_PER_KM: f64 = 1_000_000.0;

/// Millimetres per statute mile
const MM_PER_MILE: f64 = 1_609_344.0;

/// Acceptance band for alternative sizes, percent of rolling diameter
const DIAMETER_TOLERANCE_PERCENT: f64 = 3.0;

/// Alternative-size list is truncated to this many entries
const MAX_ALTERNATIVES: usize = 6;

/// Width offsets tried for alternative sizes, in generation order
const WIDTH_STEPS: [i32; 4] = [-20, -10, 10, 20];

/// Aspect-ratio offsets tried per width step, in generation order
const RATIO_STEPS: [i32; 4] = [-10, -5, 5, 10];

/// A metric tyre size: section width, aspect ratio, rim diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TyreDimension {
    /// Section width in millimetres
    pub width: u32,

    /// Sidewall height as a percentage of width
    pub aspect_ratio: u32,

    /// Rim diameter in inches
    pub rim_diameter: u32,
}

impl TyreDimension {
    pub fn new(width: u32, aspect_ratio: u32, rim_diameter: u32) -> Self {
        Self {
            width,
            aspect_ratio,
            rim_diameter,
        }
    }

    /// Metric size designation, e.g. "185/65R15"
    pub fn metric_size(&self) -> String {
        format!("{}/{}R{}", self.width, self.aspect_ratio, self.rim_diameter)
    }
}

impl std::fmt::Display for TyreDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.metric_size())
    }
}

/// Errors from the geometry calculator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("tyre dimensions must all be positive, got {width}/{aspect_ratio}R{rim_diameter}")]
    InvalidDimension {
        width: u32,
        aspect_ratio: u32,
        rim_diameter: u32,
    },

    #[error("tyre circumference computed as zero, cannot derive revolutions")]
    ZeroCircumference,
}

/// An alternative size whose rolling diameter stays within tolerance
/// of the reference size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSize {
    /// Metric designation of the candidate, e.g. "195/60R15"
    pub size: String,

    /// Candidate section width in millimetres
    pub width: u32,

    /// Candidate aspect ratio percent
    pub aspect_ratio: u32,

    /// Rolling-diameter deviation versus the reference size, percent
    pub diameter_diff_percent: f64,

    /// Signed speedometer error, e.g. "+1.1%" or "-2.4%"
    pub speedo_error: String,
}

/// Full geometry derived from one tyre size. Constructed fresh per
/// call and never persisted; all figures are rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Metric designation, e.g. "185/65R15"
    pub metric_size: String,

    /// Imperial width-rim designation, e.g. "7.3-15"
    pub imperial_size: String,

    pub diameter_mm: f64,
    pub diameter_inches: f64,
    pub circumference_mm: f64,
    pub circumference_inches: f64,
    pub sidewall_height_mm: f64,
    pub revolutions_per_km: f64,
    pub revolutions_per_mile: f64,

    /// Dimensionally equivalent sizes, generation order, at most six
    pub alternative_sizes: Vec<AlternativeSize>,
}

/// Compute rolling geometry and alternative sizes for a tyre.
///
/// Fails with [`CalcError::InvalidDimension`] when any dimension is
/// zero. Stored figures are rounded to one decimal place, half away
/// from zero; the alternative-size acceptance test uses the unrounded
/// diameter difference.
pub fn compute(dim: TyreDimension) -> Result<CalculationResult, CalcError> {
    if dim.width == 0 || dim.aspect_ratio == 0 || dim.rim_diameter == 0 {
        return Err(CalcError::InvalidDimension {
            width: dim.width,
            aspect_ratio: dim.aspect_ratio,
            rim_diameter: dim.rim_diameter,
        });
    }

    let sidewall = sidewall_height_mm(dim.width, dim.aspect_ratio);
    let diameter = dim.rim_diameter as f64 * MM_PER_INCH + 2.0 * sidewall;
    let circumference = std::f64::consts::PI * diameter;

    // Unreachable once dimensions are positive, but the revolution
    // figures divide by this.
    if circumference == 0.0 {
        return Err(CalcError::ZeroCircumference);
    }

    Ok(CalculationResult {
        metric_size: dim.metric_size(),
        imperial_size: format!(
            "{:.1}-{}",
            dim.width as f64 / MM_PER_INCH,
            dim.rim_diameter
        ),
        diameter_mm: round1(diameter),
        diameter_inches: round1(diameter / MM_PER_INCH),
        circumference_mm: round1(circumference),
        circumference_inches: round1(circumference / MM_PER_INCH),
        sidewall_height_mm: round1(sidewall),
        revolutions_per_km: round1(MM_PER_KM / circumference),
        revolutions_per_mile: round1(MM_PER_MILE / circumference),
        alternative_sizes: alternatives(dim, diameter),
    })
}

fn sidewall_height_mm(width: u32, aspect_ratio: u32) -> f64 {
    width as f64 * (aspect_ratio as f64 / 100.0)
}

/// Search the fixed width/ratio offset grid for sizes whose rolling
/// diameter stays within the tolerance band. Candidates come out in
/// grid order, truncated to the first [`MAX_ALTERNATIVES`] survivors.
fn alternatives(dim: TyreDimension, reference_diameter: f64) -> Vec<AlternativeSize> {
    let mut found = Vec::new();

    for w_step in WIDTH_STEPS {
        for r_step in RATIO_STEPS {
            let width = dim.width as i64 + w_step as i64;
            let ratio = dim.aspect_ratio as i64 + r_step as i64;
            if width <= 0 || ratio <= 0 {
                continue;
            }

            let sidewall = sidewall_height_mm(width as u32, ratio as u32);
            let diameter = dim.rim_diameter as f64 * MM_PER_INCH + 2.0 * sidewall;
            let diff = (diameter - reference_diameter) / reference_diameter * 100.0;
            if diff.abs() > DIAMETER_TOLERANCE_PERCENT {
                continue;
            }

            found.push(AlternativeSize {
                size: format!("{}/{}R{}", width, ratio, dim.rim_diameter),
                width: width as u32,
                aspect_ratio: ratio as u32,
                diameter_diff_percent: round1(diff),
                speedo_error: format_speedo_error(diff),
            });
        }
    }

    found.truncate(MAX_ALTERNATIVES);
    found
}

/// Signed percentage with one decimal and an explicit '+' for gains.
/// The sign is taken from the unrounded difference.
fn format_speedo_error(diff: f64) -> String {
    let sign = if diff > 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, diff)
}

/// Round to one decimal place, half away from zero.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_size_geometry() {
        let result = compute(TyreDimension::new(185, 65, 15)).unwrap();

        assert_eq!(result.metric_size, "185/65R15");
        assert_eq!(result.imperial_size, "7.3-15");
        assert_eq!(result.sidewall_height_mm, 120.3);
        assert_eq!(result.diameter_mm, 621.5);
        assert_eq!(result.diameter_inches, 24.5);
        assert!((result.circumference_mm - 1952.5).abs() < 0.05);
        assert!((result.circumference_inches - 76.9).abs() < 0.05);
        assert!((result.revolutions_per_km - 512.2).abs() < 0.05);
        assert!((result.revolutions_per_mile - 824.2).abs() < 0.05);
    }

    #[test]
    fn test_reference_size_alternatives() {
        let result = compute(TyreDimension::new(185, 65, 15)).unwrap();

        let sizes: Vec<&str> = result
            .alternative_sizes
            .iter()
            .map(|a| a.size.as_str())
            .collect();
        assert_eq!(
            sizes,
            vec![
                "165/70R15",
                "165/75R15",
                "175/70R15",
                "195/60R15",
                "205/55R15",
                "205/60R15"
            ]
        );

        let errors: Vec<&str> = result
            .alternative_sizes
            .iter()
            .map(|a| a.speedo_error.as_str())
            .collect();
        assert_eq!(
            errors,
            vec!["-1.5%", "+1.1%", "+0.7%", "-1.0%", "-2.4%", "+0.9%"]
        );

        assert_eq!(result.alternative_sizes[0].diameter_diff_percent, -1.5);
        assert_eq!(result.alternative_sizes[4].diameter_diff_percent, -2.4);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        for dim in [
            TyreDimension::new(0, 65, 15),
            TyreDimension::new(185, 0, 15),
            TyreDimension::new(185, 65, 0),
        ] {
            let err = compute(dim).unwrap_err();
            assert!(matches!(err, CalcError::InvalidDimension { .. }));
        }
    }

    #[test]
    fn test_alternatives_stay_within_tolerance() {
        for dim in [
            TyreDimension::new(185, 65, 15),
            TyreDimension::new(90, 90, 12),
            TyreDimension::new(255, 40, 19),
        ] {
            let result = compute(dim).unwrap();
            assert!(result.alternative_sizes.len() <= 6);
            for alt in &result.alternative_sizes {
                assert!(
                    alt.diameter_diff_percent.abs() <= 3.0,
                    "{} deviates {}%",
                    alt.size,
                    alt.diameter_diff_percent
                );
            }
        }
    }

    #[test]
    fn test_sidewall_contributes_to_diameter() {
        for dim in [
            TyreDimension::new(185, 65, 15),
            TyreDimension::new(90, 90, 12),
            TyreDimension::new(120, 70, 17),
        ] {
            let result = compute(dim).unwrap();
            assert!(result.diameter_mm > dim.rim_diameter as f64 * MM_PER_INCH);
            assert!(
                (result.circumference_mm - std::f64::consts::PI * result.diameter_mm).abs() < 1.0
            );
        }
    }

    #[test]
    fn test_revolutions_cross_check() {
        let result = compute(TyreDimension::new(205, 55, 16)).unwrap();
        // revs/km and revs/mile differ exactly by the mile/km ratio
        // before rounding; allow for the two independent roundings.
        let expected_km = result.revolutions_per_mile / 1.609344;
        assert!((result.revolutions_per_km - expected_km).abs() < 0.2);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let a = compute(TyreDimension::new(120, 70, 17)).unwrap();
        let b = compute(TyreDimension::new(120, 70, 17)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_narrow_size_skips_nonpositive_candidates() {
        // width - 20 and ratio - 10 go nonpositive here; they must be
        // skipped, not underflow.
        let result = compute(TyreDimension::new(15, 8, 10)).unwrap();
        for alt in &result.alternative_sizes {
            assert!(alt.width > 0 && alt.aspect_ratio > 0);
        }
    }

    #[test]
    fn test_speedo_error_formatting() {
        assert_eq!(format_speedo_error(1.126), "+1.1%");
        assert_eq!(format_speedo_error(-2.41), "-2.4%");
        assert_eq!(format_speedo_error(0.0), "0.0%");
    }

    #[test]
    fn test_round1_half_away_from_zero() {
        assert_eq!(round1(120.25), 120.3);
        assert_eq!(round1(-120.25), -120.3);
        assert_eq!(round1(7.283), 7.3);
    }
}

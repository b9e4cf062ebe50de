//! Fitment entity type - recommended tyre sizes and pressures for a
//! vehicle
//!
//! One fitment per vehicle. Sizes are kept both as sidewall text (the
//! authoritative form users submit) and, when the text parses, as the
//! numeric width/aspect-ratio/rim triple the size matcher needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calc::TyreRecord;
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// Tube/tubeless construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TubeType {
    Tube,
    Tubeless,
    Both,
}

impl std::fmt::Display for TubeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TubeType::Tube => write!(f, "tube"),
            TubeType::Tubeless => write!(f, "tubeless"),
            TubeType::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for TubeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tube" => Ok(TubeType::Tube),
            "tubeless" => Ok(TubeType::Tubeless),
            "both" => Ok(TubeType::Both),
            _ => Err(format!(
                "Invalid tube type: {}. Use tube, tubeless, or both",
                s
            )),
        }
    }
}

/// One axle's tyre dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxleTyre {
    /// Size designation as printed on the sidewall, e.g. "90/90-12"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Section width in millimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Aspect ratio percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<u32>,

    /// Rim diameter in inches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rim: Option<u32>,
}

impl AxleTyre {
    /// Build an axle from sidewall text, deriving the numeric triple
    /// when the text parses.
    pub fn from_size_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let parsed = parse_size(&text);
        Self {
            size: Some(text),
            width: parsed.map(|(w, _, _)| w),
            aspect_ratio: parsed.map(|(_, ar, _)| ar),
            rim: parsed.map(|(_, _, r)| r),
        }
    }

    /// Sidewall text if present, otherwise the numeric triple as
    /// "width/ratio-rim", otherwise "not specified".
    pub fn display(&self) -> String {
        if let Some(ref size) = self.size {
            if !size.is_empty() {
                return size.clone();
            }
        }
        match (self.width, self.aspect_ratio, self.rim) {
            (Some(w), Some(ar), Some(r)) => format!("{}/{}-{}", w, ar, r),
            _ => "not specified".to_string(),
        }
    }
}

/// Recommended pressures, free text so catalog data can carry units
/// ("29 PSI", "2.0 bar").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_rear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_rear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot_front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot_rear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_load_front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_load_rear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rear: Option<String>,

    /// Seasonal adjustment applied in summer
    pub summer_adjustment: String,

    /// Seasonal adjustment applied in winter
    pub winter_adjustment: String,
}

impl Default for PressureTable {
    fn default() -> Self {
        Self {
            standard_front: None,
            standard_rear: None,
            cold_front: None,
            cold_rear: None,
            hot_front: None,
            hot_rear: None,
            full_load_front: None,
            full_load_rear: None,
            max_front: None,
            max_rear: None,
            summer_adjustment: "-2 PSI".to_string(),
            winter_adjustment: "+2 PSI".to_string(),
        }
    }
}

impl PressureTable {
    /// True when no pressure value has been recorded
    pub fn is_empty(&self) -> bool {
        self.standard_front.is_none()
            && self.standard_rear.is_none()
            && self.cold_front.is_none()
            && self.cold_rear.is_none()
            && self.hot_front.is_none()
            && self.hot_rear.is_none()
            && self.full_load_front.is_none()
            && self.full_load_rear.is_none()
            && self.max_front.is_none()
            && self.max_rear.is_none()
    }
}

/// A Fitment entity - tyre sizes and pressures for one vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fitment {
    /// Unique identifier (FIT-...)
    pub id: EntityId,

    /// Vehicle this fitment belongs to
    pub vehicle: EntityId,

    /// Front axle tyre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<AxleTyre>,

    /// Rear axle tyre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rear: Option<AxleTyre>,

    /// Size shared by both axles, for vehicles running the same tyre
    /// all round
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_size: Option<String>,

    /// Recommended pressures
    #[serde(default)]
    pub pressures: PressureTable,

    /// Alternative sizes verified to fit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_index: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_rating: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tube_type: Option<TubeType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who recorded this fitment)
    pub author: String,

    /// Record revision counter
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

fn default_revision() -> u32 {
    1
}

impl Entity for Fitment {
    const PREFIX: EntityPrefix = EntityPrefix::Fit;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Fitment {
    /// Create an empty fitment for a vehicle
    pub fn new(vehicle: EntityId, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Fit),
            vehicle,
            front: None,
            rear: None,
            combined_size: None,
            pressures: PressureTable::default(),
            alternates: Vec::new(),
            load_index: None,
            speed_rating: None,
            tube_type: None,
            notes: None,
            created: Utc::now(),
            author: author.into(),
            entity_revision: 1,
        }
    }

    /// Front display text, falling back to the combined size
    pub fn front_display(&self) -> String {
        match (&self.front, &self.combined_size) {
            (Some(axle), _) => axle.display(),
            (None, Some(size)) => size.clone(),
            (None, None) => "not specified".to_string(),
        }
    }

    /// Rear display text, falling back to the combined size
    pub fn rear_display(&self) -> String {
        match (&self.rear, &self.combined_size) {
            (Some(axle), _) => axle.display(),
            (None, Some(size)) => size.clone(),
            (None, None) => "not specified".to_string(),
        }
    }

    /// Flatten this fitment into the read-only row the size matcher
    /// consumes.
    pub fn to_record(&self) -> TyreRecord {
        TyreRecord {
            vehicle_id: self.vehicle.to_string(),
            front_width: self.front.as_ref().and_then(|a| a.width),
            front_rim: self.front.as_ref().and_then(|a| a.rim),
            rear_width: self.rear.as_ref().and_then(|a| a.width),
            rear_rim: self.rear.as_ref().and_then(|a| a.rim),
            front_size_text: self.front.as_ref().and_then(|a| a.size.clone()),
            rear_size_text: self.rear.as_ref().and_then(|a| a.size.clone()),
            combined_size_text: self.combined_size.clone(),
        }
    }
}

/// Parse a sidewall designation like "185/65R15", "90/90-12" or
/// "120/70 ZR17" into its numeric width/aspect-ratio/rim triple.
/// Returns None for text that does not carry all three numbers.
pub fn parse_size(text: &str) -> Option<(u32, u32, u32)> {
    let (width_part, rest) = text.split_once('/')?;
    let width: u32 = width_part.trim().parse().ok()?;

    let ratio_end = rest.find(|c: char| !c.is_ascii_digit())?;
    let aspect_ratio: u32 = rest[..ratio_end].parse().ok()?;

    let rim_digits: String = rest[ratio_end..]
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    let rim: u32 = rim_digits.parse().ok()?;

    (width > 0 && aspect_ratio > 0 && rim > 0).then_some((width, aspect_ratio, rim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_variants() {
        assert_eq!(parse_size("185/65R15"), Some((185, 65, 15)));
        assert_eq!(parse_size("90/90-12"), Some((90, 90, 12)));
        assert_eq!(parse_size("120/70 ZR17"), Some((120, 70, 17)));
        assert_eq!(parse_size("3.00-18"), None);
        assert_eq!(parse_size("185/65"), None);
        assert_eq!(parse_size("garbage"), None);
    }

    #[test]
    fn test_axle_from_size_text() {
        let axle = AxleTyre::from_size_text("185/65R15");
        assert_eq!(axle.width, Some(185));
        assert_eq!(axle.aspect_ratio, Some(65));
        assert_eq!(axle.rim, Some(15));
        assert_eq!(axle.display(), "185/65R15");

        // Unparseable text keeps the designation but no numbers
        let axle = AxleTyre::from_size_text("3.00-18");
        assert_eq!(axle.width, None);
        assert_eq!(axle.display(), "3.00-18");
    }

    #[test]
    fn test_axle_display_fallbacks() {
        let axle = AxleTyre {
            size: None,
            width: Some(90),
            aspect_ratio: Some(90),
            rim: Some(12),
        };
        assert_eq!(axle.display(), "90/90-12");
        assert_eq!(AxleTyre::default().display(), "not specified");
    }

    #[test]
    fn test_to_record_maps_axles() {
        let mut fit = Fitment::new(EntityId::new(EntityPrefix::Veh), "test");
        fit.front = Some(AxleTyre::from_size_text("90/90-12"));
        fit.rear = Some(AxleTyre::from_size_text("100/80-12"));

        let record = fit.to_record();
        assert_eq!(record.vehicle_id, fit.vehicle.to_string());
        assert_eq!(record.front_width, Some(90));
        assert_eq!(record.rear_width, Some(100));
        assert_eq!(record.front_rim, Some(12));
        assert_eq!(record.front_size_text.as_deref(), Some("90/90-12"));
        assert_eq!(record.combined_size_text, None);
    }

    #[test]
    fn test_to_record_absent_axles_stay_absent() {
        let mut fit = Fitment::new(EntityId::new(EntityPrefix::Veh), "test");
        fit.combined_size = Some("145/80R12".to_string());

        let record = fit.to_record();
        assert_eq!(record.front_width, None);
        assert_eq!(record.rear_width, None);
        assert_eq!(record.combined_size_text.as_deref(), Some("145/80R12"));
    }

    #[test]
    fn test_fitment_roundtrip() {
        let mut fit = Fitment::new(EntityId::new(EntityPrefix::Veh), "test");
        fit.front = Some(AxleTyre::from_size_text("110/70R17"));
        fit.pressures.standard_front = Some("29 PSI".to_string());
        fit.tube_type = Some(TubeType::Tubeless);

        let yaml = serde_yml::to_string(&fit).unwrap();
        let parsed: Fitment = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(fit.id, parsed.id);
        assert_eq!(fit.front, parsed.front);
        assert_eq!(fit.pressures, parsed.pressures);
        assert_eq!(parsed.tube_type, Some(TubeType::Tubeless));
        assert!(yaml.contains("tube_type: tubeless"));
    }

    #[test]
    fn test_pressure_table_defaults() {
        let table = PressureTable::default();
        assert!(table.is_empty());
        assert_eq!(table.summer_adjustment, "-2 PSI");
        assert_eq!(table.winter_adjustment, "+2 PSI");
    }
}

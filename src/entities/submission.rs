//! Submission entity type - user-contributed vehicle data awaiting
//! review
//!
//! Submissions never enter the catalog directly; `review approve`
//! creates the vehicle and fitment records from one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::vehicle::VehicleCategory;

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Approved => write!(f, "approved"),
            SubmissionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            _ => Err(format!("Unknown submission status: {}", s)),
        }
    }
}

/// Contact details for the person submitting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submitter {
    pub name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A user-submitted vehicle awaiting admin review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier (SUB-...)
    pub id: EntityId,

    /// Who submitted this
    pub submitter: Submitter,

    pub brand: String,
    pub model: String,
    pub year: u16,

    #[serde(default)]
    pub category: VehicleCategory,

    /// Front tyre size as sidewall text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_size: Option<String>,

    /// Rear tyre size as sidewall text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rear_size: Option<String>,

    /// Size shared by both axles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_pressure: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rear_pressure: Option<String>,

    /// Where the submitter got the information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// Review status
    #[serde(default)]
    pub status: SubmissionStatus,

    /// Reviewer notes, set on approval or rejection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Last review action timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Record revision counter
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

fn default_revision() -> u32 {
    1
}

impl Entity for Submission {
    const PREFIX: EntityPrefix = EntityPrefix::Sub;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.submitter.name
    }
}

impl Submission {
    /// Create a pending submission
    pub fn new(
        submitter: Submitter,
        brand: impl Into<String>,
        model: impl Into<String>,
        year: u16,
        category: VehicleCategory,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Sub),
            submitter,
            brand: brand.into(),
            model: model.into(),
            year,
            category,
            front_size: None,
            rear_size: None,
            combined_size: None,
            front_pressure: None,
            rear_pressure: None,
            source: None,
            comments: None,
            status: SubmissionStatus::Pending,
            review_notes: None,
            created: Utc::now(),
            updated: None,
            entity_revision: 1,
        }
    }

    /// Display name, e.g. "Honda Activa 6G (2020)"
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Submission {
        Submission::new(
            Submitter {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: None,
            },
            "Honda",
            "Activa 6G",
            2020,
            VehicleCategory::Scooter,
        )
    }

    #[test]
    fn test_submission_defaults_to_pending() {
        let sub = sample();
        assert!(sub.id.to_string().starts_with("SUB-"));
        assert_eq!(sub.status, SubmissionStatus::Pending);
        assert!(sub.review_notes.is_none());
        assert!(sub.updated.is_none());
    }

    #[test]
    fn test_submission_roundtrip() {
        let mut sub = sample();
        sub.front_size = Some("90/90-12".to_string());
        sub.source = Some("owner's manual".to_string());

        let yaml = serde_yml::to_string(&sub).unwrap();
        let parsed: Submission = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(sub.id, parsed.id);
        assert_eq!(parsed.front_size.as_deref(), Some("90/90-12"));
        assert_eq!(parsed.status, SubmissionStatus::Pending);
        assert!(yaml.contains("status: pending"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "APPROVED".parse::<SubmissionStatus>().unwrap(),
            SubmissionStatus::Approved
        );
        assert!("maybe".parse::<SubmissionStatus>().is_err());
    }
}

//! Tyre match filter
//!
//! A single linear scan over a read-only snapshot of fitment records.
//! Each query shape mirrors one public search form: exact width/rim
//! equality, inclusive width/rim ranges, and case-insensitive
//! substring matching over size designations.

use serde::{Deserialize, Serialize};

/// One vehicle's tyre dimensions as the matcher sees them.
///
/// Absent fields mean "not on record" and never satisfy a numeric or
/// text condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TyreRecord {
    pub vehicle_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_rim: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rear_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rear_rim: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_size_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rear_size_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_size_text: Option<String>,
}

/// A size search. Every field is optional; an `Exact` or `Range` query
/// with no constraints matches everything, a `Text` query with no
/// needles matches nothing (no text means no search was requested).
#[derive(Debug, Clone, PartialEq)]
pub enum SizeQuery {
    /// Exact width and/or rim equality. When both are given, the width
    /// and rim conditions AND together, but either axle may satisfy
    /// either condition independently.
    Exact { width: Option<u32>, rim: Option<u32> },

    /// Inclusive bounds. Each supplied bound holds when either axle
    /// satisfies it; bounds AND together.
    Range {
        min_width: Option<u32>,
        max_width: Option<u32>,
        min_rim: Option<u32>,
        max_rim: Option<u32>,
    },

    /// Case-insensitive substring over size designations: the front
    /// needle against front or combined text, the rear needle against
    /// rear or combined text.
    Text {
        front: Option<String>,
        rear: Option<String>,
    },
}

/// Return the vehicle IDs whose records match the query, preserving
/// the snapshot's order. A vehicle appears once per matching record.
pub fn filter(catalog: &[TyreRecord], query: &SizeQuery) -> Vec<String> {
    catalog
        .iter()
        .filter(|record| matches(record, query))
        .map(|record| record.vehicle_id.clone())
        .collect()
}

fn matches(record: &TyreRecord, query: &SizeQuery) -> bool {
    match query {
        SizeQuery::Exact { width, rim } => {
            let width_ok = width.map_or(true, |w| {
                record.front_width == Some(w) || record.rear_width == Some(w)
            });
            let rim_ok = rim.map_or(true, |r| {
                record.front_rim == Some(r) || record.rear_rim == Some(r)
            });
            width_ok && rim_ok
        }
        SizeQuery::Range {
            min_width,
            max_width,
            min_rim,
            max_rim,
        } => {
            axle_bound(record.front_width, record.rear_width, *min_width, |v, b| v >= b)
                && axle_bound(record.front_width, record.rear_width, *max_width, |v, b| {
                    v <= b
                })
                && axle_bound(record.front_rim, record.rear_rim, *min_rim, |v, b| v >= b)
                && axle_bound(record.front_rim, record.rear_rim, *max_rim, |v, b| v <= b)
        }
        SizeQuery::Text { front, rear } => {
            if front.is_none() && rear.is_none() {
                return false;
            }
            let front_ok = front.as_deref().map_or(true, |needle| {
                contains_ci(record.front_size_text.as_deref(), needle)
                    || contains_ci(record.combined_size_text.as_deref(), needle)
            });
            let rear_ok = rear.as_deref().map_or(true, |needle| {
                contains_ci(record.rear_size_text.as_deref(), needle)
                    || contains_ci(record.combined_size_text.as_deref(), needle)
            });
            front_ok && rear_ok
        }
    }
}

/// A bound holds when either axle's value satisfies it. Absent values
/// never satisfy a bound; an absent bound always holds.
fn axle_bound<F>(front: Option<u32>, rear: Option<u32>, limit: Option<u32>, cmp: F) -> bool
where
    F: Fn(u32, u32) -> bool,
{
    match limit {
        None => true,
        Some(bound) => {
            front.map_or(false, |v| cmp(v, bound)) || rear.map_or(false, |v| cmp(v, bound))
        }
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.map_or(false, |h| {
        h.to_lowercase().contains(&needle.to_lowercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> TyreRecord {
        TyreRecord {
            vehicle_id: id.to_string(),
            ..Default::default()
        }
    }

    fn sample_catalog() -> Vec<TyreRecord> {
        vec![
            TyreRecord {
                front_width: Some(185),
                front_rim: Some(15),
                rear_width: Some(185),
                rear_rim: Some(15),
                combined_size_text: Some("185/65R15".to_string()),
                ..record("VEH-1")
            },
            TyreRecord {
                front_width: Some(195),
                front_rim: Some(16),
                front_size_text: Some("195/55R16".to_string()),
                rear_width: Some(215),
                rear_rim: Some(16),
                rear_size_text: Some("215/50R16".to_string()),
                ..record("VEH-2")
            },
            TyreRecord {
                front_width: Some(90),
                front_rim: Some(12),
                front_size_text: Some("90/90-12".to_string()),
                rear_width: Some(100),
                rear_rim: Some(12),
                rear_size_text: Some("100/80-12".to_string()),
                ..record("VEH-3")
            },
            // No tyre data on record at all
            record("VEH-4"),
        ]
    }

    #[test]
    fn test_empty_exact_query_returns_catalog_in_order() {
        let catalog = sample_catalog();
        let ids = filter(
            &catalog,
            &SizeQuery::Exact {
                width: None,
                rim: None,
            },
        );
        assert_eq!(ids, vec!["VEH-1", "VEH-2", "VEH-3", "VEH-4"]);
    }

    #[test]
    fn test_exact_width_matches_either_axle() {
        let catalog = sample_catalog();
        let ids = filter(
            &catalog,
            &SizeQuery::Exact {
                width: Some(215),
                rim: None,
            },
        );
        assert_eq!(ids, vec!["VEH-2"]);
    }

    #[test]
    fn test_exact_width_and_rim_combine_with_and() {
        let catalog = sample_catalog();
        let ids = filter(
            &catalog,
            &SizeQuery::Exact {
                width: Some(185),
                rim: Some(16),
            },
        );
        assert!(ids.is_empty());
    }

    #[test]
    fn test_exact_conditions_satisfiable_by_different_axles() {
        // Front satisfies the width, rear satisfies the rim. This
        // looseness is inherited behavior and intentionally kept.
        let catalog = vec![TyreRecord {
            front_width: Some(120),
            front_rim: Some(17),
            rear_width: Some(160),
            rear_rim: Some(16),
            ..record("VEH-9")
        }];
        let ids = filter(
            &catalog,
            &SizeQuery::Exact {
                width: Some(120),
                rim: Some(16),
            },
        );
        assert_eq!(ids, vec!["VEH-9"]);
    }

    #[test]
    fn test_range_min_width() {
        let catalog = vec![
            TyreRecord {
                front_width: Some(185),
                front_rim: Some(15),
                ..record("VEH-1")
            },
            TyreRecord {
                front_width: Some(195),
                front_rim: Some(16),
                ..record("VEH-2")
            },
        ];
        let ids = filter(
            &catalog,
            &SizeQuery::Range {
                min_width: Some(190),
                max_width: None,
                min_rim: None,
                max_rim: None,
            },
        );
        assert_eq!(ids, vec!["VEH-2"]);
    }

    #[test]
    fn test_range_bounds_satisfiable_by_different_axles() {
        // Front clears the minimum, rear clears the maximum.
        let catalog = vec![TyreRecord {
            front_width: Some(200),
            rear_width: Some(100),
            ..record("VEH-5")
        }];
        let ids = filter(
            &catalog,
            &SizeQuery::Range {
                min_width: Some(150),
                max_width: Some(120),
                min_rim: None,
                max_rim: None,
            },
        );
        assert_eq!(ids, vec!["VEH-5"]);
    }

    #[test]
    fn test_range_rim_bounds() {
        let catalog = sample_catalog();
        let ids = filter(
            &catalog,
            &SizeQuery::Range {
                min_width: None,
                max_width: None,
                min_rim: Some(15),
                max_rim: Some(16),
            },
        );
        assert_eq!(ids, vec!["VEH-1", "VEH-2"]);
    }

    #[test]
    fn test_absent_fields_never_match() {
        let catalog = sample_catalog();

        let exact = filter(
            &catalog,
            &SizeQuery::Exact {
                width: Some(0),
                rim: None,
            },
        );
        assert!(exact.is_empty(), "absent widths must not coerce to zero");

        let range = filter(
            &catalog,
            &SizeQuery::Range {
                min_width: Some(1),
                max_width: None,
                min_rim: None,
                max_rim: None,
            },
        );
        assert!(!range.contains(&"VEH-4".to_string()));
    }

    #[test]
    fn test_text_front_substring_case_insensitive() {
        let catalog = sample_catalog();
        let ids = filter(
            &catalog,
            &SizeQuery::Text {
                front: Some("90/90".to_string()),
                rear: None,
            },
        );
        assert_eq!(ids, vec!["VEH-3"]);

        let ids = filter(
            &catalog,
            &SizeQuery::Text {
                front: Some("195/55r16".to_string()),
                rear: None,
            },
        );
        assert_eq!(ids, vec!["VEH-2"]);
    }

    #[test]
    fn test_text_combined_satisfies_both_needles() {
        let catalog = sample_catalog();
        let ids = filter(
            &catalog,
            &SizeQuery::Text {
                front: Some("185/65".to_string()),
                rear: Some("R15".to_string()),
            },
        );
        assert_eq!(ids, vec!["VEH-1"]);
    }

    #[test]
    fn test_text_both_needles_must_hold() {
        let catalog = sample_catalog();
        let ids = filter(
            &catalog,
            &SizeQuery::Text {
                front: Some("90/90".to_string()),
                rear: Some("215/50".to_string()),
            },
        );
        assert!(ids.is_empty());
    }

    #[test]
    fn test_empty_text_query_matches_nothing() {
        let catalog = sample_catalog();
        let ids = filter(
            &catalog,
            &SizeQuery::Text {
                front: None,
                rear: None,
            },
        );
        assert!(ids.is_empty());
    }
}

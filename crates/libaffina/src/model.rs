use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AffinaError;

/// The fixed set of causes a record can be filed under.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Environment,
  Education,
  Social,
  Health,
  Technology,
  #[default]
  General,
}

impl Category {
  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Environment => "environment",
      Category::Education => "education",
      Category::Social => "social",
      Category::Health => "health",
      Category::Technology => "technology",
      Category::General => "general",
    }
  }
}

impl FromStr for Category {
  type Err = AffinaError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "environment" => Ok(Category::Environment),
      "education" => Ok(Category::Education),
      "social" => Ok(Category::Social),
      "health" => Ok(Category::Health),
      "technology" => Ok(Category::Technology),
      "general" => Ok(Category::General),
      other => Err(AffinaError::InvalidCategory(other.to_string())),
    }
  }
}

/// A category selector as used by filter controls, with `all` as the
/// no-filtering sentinel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CategoryFilter {
  #[default]
  All,
  Only(Category),
}

impl CategoryFilter {
  pub fn matches(&self, category: Category) -> bool {
    match self {
      CategoryFilter::All => true,
      CategoryFilter::Only(only) => *only == category,
    }
  }

  /// Submissions made while the `all` selector is active land in `general`.
  pub fn or_general(self) -> Category {
    match self {
      CategoryFilter::All => Category::General,
      CategoryFilter::Only(category) => category,
    }
  }
}

impl FromStr for CategoryFilter {
  type Err = AffinaError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "all" => Ok(CategoryFilter::All),
      other => Ok(CategoryFilter::Only(other.parse()?)),
    }
  }
}

impl<'de> Deserialize<'de> for CategoryFilter {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = String::deserialize(deserializer)?;

    value.parse().map_err(serde::de::Error::custom)
  }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct Location {
  pub lat: f64,
  pub lng: f64,
}

impl Location {
  pub fn is_valid(&self) -> bool {
    self.lat.is_finite() && self.lng.is_finite() && (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
  }
}

/// One user-submitted point of interest on the map.
///
/// Records fetched from the remote source carry a server-assigned `id`.
/// Locally created records may not have one yet, in which case they are never
/// deduplicated by [`crate::merge_records`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InterestRecord {
  #[serde(default, deserialize_with = "id_from_json", skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  pub location: Location,
  pub interest: String,
  #[serde(default)]
  pub category: Category,
  #[serde(default = "Timestamp::now")]
  pub timestamp: Timestamp,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatar: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub connections: Vec<String>,
}

impl InterestRecord {
  pub fn is_valid(&self) -> bool {
    !self.interest.trim().is_empty() && self.location.is_valid()
  }
}

/// A content/library record (talks, articles), the second record shape the
/// merger serves.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ContentItem {
  #[serde(default, deserialize_with = "id_from_json", skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  pub title: String,
  #[serde(default)]
  pub speaker: String,
  #[serde(default)]
  pub duration: u32,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub url: String,
}

impl ContentItem {
  pub fn is_valid(&self) -> bool {
    !self.title.trim().is_empty()
  }
}

/// A scored candidate, derived on every query and never persisted.
#[derive(Clone, Debug, Serialize)]
pub struct SimilarityResult {
  #[serde(flatten)]
  pub record: InterestRecord,
  pub similarity: f64,
}

// Upstream sources are inconsistent about identifier types, numbers and
// strings both occur in the wild.
fn id_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
  match Option::<serde_json::Value>::deserialize(deserializer)? {
    None | Some(serde_json::Value::Null) => Ok(None),
    Some(serde_json::Value::String(id)) => Ok(Some(id)),
    Some(serde_json::Value::Number(id)) => Ok(Some(id.to_string())),
    Some(other) => Err(serde::de::Error::custom(format!("invalid identifier: {other}"))),
  }
}

/// Turn an untyped remote payload into well-formed records.
///
/// A payload that is not an array degrades to an empty collection, and
/// entries that fail validation are dropped with a warning. Malformed remote
/// data never becomes an error past this boundary.
pub fn normalize_records(payload: serde_json::Value) -> Vec<InterestRecord> {
  normalize(payload, "map")
}

pub fn normalize_content(payload: serde_json::Value) -> Vec<ContentItem> {
  normalize(payload, "content")
}

fn normalize<T>(payload: serde_json::Value, source: &str) -> Vec<T>
where
  T: serde::de::DeserializeOwned + Validated,
{
  let Some(items) = payload.as_array() else {
    if !payload.is_null() {
      tracing::warn!(source = source, "payload is not an array, ignoring");
    }

    return vec![];
  };

  items
    .iter()
    .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
      Ok(record) if record.is_valid() => Some(record),
      Ok(_) => {
        tracing::warn!(source = source, "dropping invalid record");
        None
      }

      Err(err) => {
        tracing::warn!(source = source, error = err.to_string(), "dropping malformed record");
        None
      }
    })
    .collect()
}

pub(crate) trait Validated {
  fn is_valid(&self) -> bool;
}

impl Validated for InterestRecord {
  fn is_valid(&self) -> bool {
    InterestRecord::is_valid(self)
  }
}

impl Validated for ContentItem {
  fn is_valid(&self) -> bool {
    ContentItem::is_valid(self)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::{Category, CategoryFilter};

  #[test]
  fn category_from_str() {
    assert!(matches!("environment".parse(), Ok(Category::Environment)));
    assert!(matches!("general".parse(), Ok(Category::General)));
    assert!(matches!("politics".parse::<Category>(), Err(_)));
  }

  #[test]
  fn category_filter_from_str() {
    assert!(matches!("all".parse(), Ok(CategoryFilter::All)));
    assert!(matches!("health".parse(), Ok(CategoryFilter::Only(Category::Health))));
    assert!(matches!("politics".parse::<CategoryFilter>(), Err(_)));
  }

  #[test]
  fn category_filter_matches() {
    assert!(CategoryFilter::All.matches(Category::Social));
    assert!(CategoryFilter::Only(Category::Social).matches(Category::Social));
    assert!(!CategoryFilter::Only(Category::Social).matches(Category::Health));
  }

  #[test]
  fn submission_category_defaults_to_general() {
    assert_eq!(CategoryFilter::All.or_general(), Category::General);
    assert_eq!(CategoryFilter::Only(Category::Technology).or_general(), Category::Technology);
  }

  #[test]
  fn normalize_tolerates_malformed_payloads() {
    assert!(super::normalize_records(json!({"error": "oops"})).is_empty());
    assert!(super::normalize_records(json!(null)).is_empty());
    assert!(super::normalize_records(json!([])).is_empty());
  }

  #[test]
  fn normalize_drops_invalid_entries() {
    let payload = json!([
      { "id": "1", "location": { "lat": 28.6, "lng": 77.2 }, "interest": "Urban tree planting", "category": "environment", "timestamp": "2023-10-15T09:30:00Z" },
      { "id": 2, "location": { "lat": 19.0, "lng": 72.8 }, "interest": "Beach cleanup", "category": "environment", "timestamp": "2023-11-02T14:15:00Z" },
      { "id": "3", "location": { "lat": 91.0, "lng": 0.0 }, "interest": "Out of range", "timestamp": "2023-11-02T14:15:00Z" },
      { "id": "4", "location": { "lat": 0.0, "lng": 0.0 }, "interest": "   ", "timestamp": "2023-11-02T14:15:00Z" },
      { "interest": "No location at all" },
    ]);

    let records = super::normalize_records(payload);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_deref(), Some("1"));
    assert_eq!(records[1].id.as_deref(), Some("2"));
  }

  #[test]
  fn records_without_timestamp_get_one() {
    let payload = json!([{ "id": "1", "location": { "lat": 0.0, "lng": 0.0 }, "interest": "Community gardens" }]);

    let records = super::normalize_records(payload);

    assert_eq!(records.len(), 1);
  }
}

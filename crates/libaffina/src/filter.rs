use serde::Deserialize;

use crate::model::{CategoryFilter, InterestRecord};

/// Narrowing criteria for the working set: an exact category (or the `all`
/// sentinel) ANDed with a case-insensitive substring search on the interest
/// text.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilterParams {
  #[serde(default)]
  pub category: CategoryFilter,
  #[serde(default, rename = "q")]
  pub search: Option<String>,
}

/// Filter `records` down to those matching both predicates. The input is left
/// untouched; the predicates commute.
pub fn filter_records(records: &[InterestRecord], params: &FilterParams) -> Vec<InterestRecord> {
  let needle = params.search.as_deref().map(str::to_lowercase).filter(|needle| !needle.is_empty());

  records
    .iter()
    .filter(|record| params.category.matches(record.category))
    .filter(|record| match &needle {
      Some(needle) => record.interest.to_lowercase().contains(needle.as_str()),
      None => true,
    })
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use jiff::Timestamp;

  use super::{FilterParams, filter_records};
  use crate::model::{Category, CategoryFilter, InterestRecord, Location};

  fn record(id: &str, interest: &str, category: Category) -> InterestRecord {
    InterestRecord {
      id: Some(id.to_string()),
      location: Location { lat: 0.0, lng: 0.0 },
      interest: interest.to_string(),
      category,
      timestamp: Timestamp::UNIX_EPOCH,
      avatar: None,
      connections: vec![],
    }
  }

  fn records() -> Vec<InterestRecord> {
    vec![
      record("1", "Urban tree planting", Category::Environment),
      record("2", "Beach cleanup initiatives", Category::Environment),
      record("3", "STEM education for girls", Category::Education),
      record("4", "Tree census volunteering", Category::Social),
    ]
  }

  #[test]
  fn all_sentinel_keeps_everything() {
    let records = records();

    assert_eq!(filter_records(&records, &FilterParams::default()).len(), records.len());
  }

  #[test]
  fn filters_by_category() {
    let results = filter_records(
      &records(),
      &FilterParams {
        category: CategoryFilter::Only(Category::Environment),
        search: None,
      },
    );

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|record| record.category == Category::Environment));
  }

  #[test]
  fn search_is_case_insensitive_substring() {
    let results = filter_records(
      &records(),
      &FilterParams {
        category: CategoryFilter::All,
        search: Some("TREE".to_string()),
      },
    );

    assert_eq!(results.len(), 2);
  }

  #[test]
  fn empty_search_matches_everything() {
    let results = filter_records(
      &records(),
      &FilterParams {
        category: CategoryFilter::All,
        search: Some(String::new()),
      },
    );

    assert_eq!(results.len(), 4);
  }

  #[test]
  fn predicates_commute() {
    let by_category = FilterParams {
      category: CategoryFilter::Only(Category::Environment),
      search: None,
    };
    let by_search = FilterParams {
      category: CategoryFilter::All,
      search: Some("tree".to_string()),
    };
    let both = FilterParams {
      category: CategoryFilter::Only(Category::Environment),
      search: Some("tree".to_string()),
    };

    let category_then_search = filter_records(&filter_records(&records(), &by_category), &by_search);
    let search_then_category = filter_records(&filter_records(&records(), &by_search), &by_category);
    let combined = filter_records(&records(), &both);

    let ids = |records: &[InterestRecord]| records.iter().filter_map(|record| record.id.clone()).collect::<Vec<_>>();

    assert_eq!(ids(&category_then_search), ids(&search_then_category));
    assert_eq!(ids(&category_then_search), ids(&combined));
    assert_eq!(ids(&combined), vec!["1"]);
  }

  #[test]
  fn does_not_mutate_input() {
    let records = records();
    let before = records.len();

    let _ = filter_records(
      &records,
      &FilterParams {
        category: CategoryFilter::Only(Category::Health),
        search: None,
      },
    );

    assert_eq!(records.len(), before);
  }
}

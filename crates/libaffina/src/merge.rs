use ahash::HashMap;

use crate::model::{ContentItem, InterestRecord};

/// Anything mergeable by identity. Records without a server-assigned
/// identifier return `None` and are exempt from deduplication.
pub trait Identified {
  fn id(&self) -> Option<&str>;
}

impl Identified for InterestRecord {
  fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }
}

impl Identified for ContentItem {
  fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }
}

/// Merge two collections by identity, remote wins.
///
/// The result keeps first-seen insertion order over the concatenation
/// `primary` then `secondary`. When the same id occurs in both, the record
/// from `secondary` replaces the one from `primary` in full at its original
/// position. Records without an id are always retained.
pub fn merge_records<T: Identified>(primary: Vec<T>, secondary: Vec<T>) -> Vec<T> {
  let mut merged: Vec<T> = Vec::with_capacity(primary.len() + secondary.len());
  let mut positions: HashMap<String, usize> = HashMap::default();

  for record in primary.into_iter().chain(secondary) {
    let Some(key) = record.id().map(str::to_owned) else {
      merged.push(record);
      continue;
    };

    match positions.get(&key) {
      Some(&position) => merged[position] = record,

      None => {
        positions.insert(key, merged.len());
        merged.push(record);
      }
    }
  }

  merged
}

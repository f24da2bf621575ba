//! Statically bundled fallback datasets, used whenever the remote source is
//! unavailable, slow or returns an unexpected shape.

use std::sync::LazyLock;

use rust_embed::Embed;
use serde::de::DeserializeOwned;

use crate::model::{ContentItem, InterestRecord};

#[derive(Embed)]
#[folder = "assets/seed"]
struct SeedData;

pub(crate) static MAP_USERS: LazyLock<Vec<InterestRecord>> = LazyLock::new(|| load("map_users.json"));
pub(crate) static CONTENT: LazyLock<Vec<ContentItem>> = LazyLock::new(|| load("content.json"));

fn load<T: DeserializeOwned>(name: &str) -> Vec<T> {
  let file = SeedData::get(name).expect("missing seed dataset");

  serde_json::from_slice(&file.data).expect("invalid seed dataset")
}

/// A fresh copy of the seed map records.
pub fn map_users() -> Vec<InterestRecord> {
  MAP_USERS.clone()
}

/// A fresh copy of the seed content items.
pub fn content() -> Vec<ContentItem> {
  CONTENT.clone()
}

mod affina;
mod cache;
mod error;
mod fetcher;
mod filter;
mod matching;
mod merge;
mod model;
mod similarity;

pub mod seed;

pub fn init() {
  std::sync::LazyLock::force(&seed::MAP_USERS);
  std::sync::LazyLock::force(&seed::CONTENT);
}

pub mod prelude {
  pub use crate::affina::{Affina, AffinaConfig};
  pub use crate::cache::TtlCache;
  pub use crate::error::AffinaError;
  pub use crate::fetcher::{Fetcher, HttpFetcher, StaticFetcher};
  pub use crate::filter::{FilterParams, filter_records};
  pub use crate::matching::{RankParams, rank_matches, rank_matches_where};
  pub use crate::merge::{Identified, merge_records};
  pub use crate::model::{Category, CategoryFilter, ContentItem, InterestRecord, Location, SimilarityResult, normalize_content, normalize_records};
  pub use crate::similarity::similarity;
}

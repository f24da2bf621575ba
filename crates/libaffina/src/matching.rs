use serde::Deserialize;
use serde_inline_default::serde_inline_default;

use crate::{
  model::{InterestRecord, SimilarityResult},
  similarity::similarity,
};

/// Threshold and result-count settings for a ranking pass.
///
/// The two presets cover the common lookups, free-text search and
/// related-records. Both remain fully caller-configurable.
#[serde_inline_default]
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct RankParams {
  #[serde_inline_default(0.3)]
  pub threshold: f64,
  #[serde_inline_default(5)]
  pub limit: usize,
}

impl Default for RankParams {
  fn default() -> Self {
    RankParams::search()
  }
}

impl RankParams {
  pub fn search() -> RankParams {
    RankParams { threshold: 0.3, limit: 5 }
  }

  pub fn related() -> RankParams {
    RankParams { threshold: 0.4, limit: 3 }
  }
}

/// Score every candidate against `query` and return the best matches,
/// highest similarity first.
pub fn rank_matches(query: &str, candidates: &[InterestRecord], params: &RankParams) -> Vec<SimilarityResult> {
  rank_matches_where(query, candidates, params, |_| true)
}

/// Same as [`rank_matches`], restricted to candidates accepted by `keep`
/// (used to exclude a clicked record from its own related list).
///
/// Only scores strictly above the threshold are retained. An empty or
/// whitespace-only query short-circuits to no matches.
pub fn rank_matches_where(query: &str, candidates: &[InterestRecord], params: &RankParams, keep: impl Fn(&InterestRecord) -> bool) -> Vec<SimilarityResult> {
  if query.trim().is_empty() {
    return vec![];
  }

  let mut results = candidates
    .iter()
    .filter(|record| keep(record))
    .filter_map(|record| {
      let score = similarity(query, &record.interest);

      (score > params.threshold).then(|| SimilarityResult {
        record: record.clone(),
        similarity: score,
      })
    })
    .collect::<Vec<_>>();

  // Stable sort, candidates with equal scores keep their original order.
  results.sort_by(|lhs, rhs| rhs.similarity.total_cmp(&lhs.similarity));
  results.truncate(params.limit);

  results
}

use libaffina::prelude::*;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct MatchPayload {
  #[validate(length(min = 1, message = "interest must not be empty"))]
  pub interest: String,

  #[serde(flatten)]
  pub params: RankParams,
}

// The related lookup carries its own defaults (stricter threshold, shorter
// list) than the free-text search.
#[serde_inline_default]
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct RelatedParams {
  #[serde_inline_default(0.4)]
  pub threshold: f64,
  #[serde_inline_default(3)]
  pub limit: usize,
}

impl From<RelatedParams> for RankParams {
  fn from(params: RelatedParams) -> Self {
    RankParams {
      threshold: params.threshold,
      limit: params.limit,
    }
  }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct RecordPayload {
  pub location: Location,
  #[validate(length(min = 1, message = "interest must not be empty"))]
  pub interest: String,
  #[serde(default)]
  pub category: CategoryFilter,
  #[serde(default)]
  pub avatar: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct MatchResponse {
  pub results: Vec<SimilarityResult>,
  pub total: usize,
  pub limit: usize,
}

#[derive(Serialize)]
pub(crate) struct RecordsResponse {
  pub data: Vec<InterestRecord>,
  pub total: usize,
}

#[derive(Serialize)]
pub(crate) struct RecordResponse {
  pub data: InterestRecord,
}

#[derive(Serialize)]
pub(crate) struct ContentResponse {
  pub data: Vec<ContentItem>,
  pub total: usize,
}

#[derive(Serialize)]
pub(crate) struct Version {
  pub affina: &'static str,
  pub env: String,
}

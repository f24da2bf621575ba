use axum::{Json, extract::State, response::IntoResponse};
use libaffina::prelude::*;
use tracing::instrument;
use validator::Validate;

use crate::api::{
  AppState,
  dto::{MatchPayload, MatchResponse},
  errors::AppError,
};

#[instrument(skip_all)]
pub async fn find_matches<F: Fetcher>(State(state): State<AppState<F>>, Json(payload): Json<MatchPayload>) -> Result<impl IntoResponse, AppError> {
  payload.validate()?;

  let results = state.affina.matches(&payload.interest, &payload.params).await;

  Ok(Json(MatchResponse {
    total: results.len(),
    limit: payload.params.limit,
    results,
  }))
}

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use axum_extra::extract::Query;
use jiff::Timestamp;
use libaffina::prelude::*;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::api::{
  AppState,
  dto::{MatchResponse, RecordPayload, RecordResponse, RecordsResponse, RelatedParams},
  errors::AppError,
};

pub async fn list_records<F: Fetcher>(State(state): State<AppState<F>>, Query(params): Query<FilterParams>) -> Result<impl IntoResponse, AppError> {
  let records = state.affina.records(&params).await;

  Ok(Json(RecordsResponse { total: records.len(), data: records }))
}

#[instrument(skip_all)]
pub async fn add_record<F: Fetcher>(State(state): State<AppState<F>>, Json(payload): Json<RecordPayload>) -> Result<(StatusCode, impl IntoResponse), AppError> {
  payload.validate()?;

  if !payload.location.is_valid() {
    return Err(AppError::BadRequest);
  }

  let record = InterestRecord {
    id: Some(Uuid::new_v4().to_string()),
    location: payload.location,
    interest: payload.interest.trim().to_string(),
    category: payload.category.or_general(),
    timestamp: Timestamp::now(),
    avatar: payload.avatar,
    connections: vec![],
  };

  state.affina.add_record(record.clone()).await;

  Ok((StatusCode::CREATED, Json(RecordResponse { data: record })))
}

#[instrument(skip_all, fields(id = %id))]
pub async fn related_records<F: Fetcher>(
  State(state): State<AppState<F>>,
  Path((id,)): Path<(String,)>,
  Query(params): Query<RelatedParams>,
) -> Result<impl IntoResponse, AppError> {
  let Some(results) = state.affina.related_to(&id, &params.into()).await else {
    return Err(AppError::ResourceNotFound);
  };

  Ok(Json(MatchResponse {
    total: results.len(),
    limit: params.limit,
    results,
  }))
}

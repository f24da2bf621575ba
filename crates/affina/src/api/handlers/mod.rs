mod matches;
mod records;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use libaffina::prelude::*;

use crate::api::{
  AppState,
  dto::{ContentResponse, Version},
  errors::AppError,
};

pub(crate) use self::matches::find_matches;
pub(crate) use self::records::{add_record, list_records, related_records};

pub(crate) async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub(crate) async fn healthz() -> StatusCode {
  StatusCode::OK
}

pub(crate) async fn readyz<F: Fetcher>(State(state): State<AppState<F>>) -> StatusCode {
  // Ready as soon as the working set holds anything, seed data included.
  match state.affina.records(&FilterParams::default()).await.is_empty() {
    true => StatusCode::SERVICE_UNAVAILABLE,
    false => StatusCode::OK,
  }
}

pub(crate) async fn list_content<F: Fetcher>(State(state): State<AppState<F>>) -> impl IntoResponse {
  let content = state.affina.content().await;

  Json(ContentResponse { total: content.len(), data: content })
}

pub(crate) async fn version<F: Fetcher>(State(state): State<AppState<F>>) -> impl IntoResponse {
  Json(Version {
    affina: env!("CARGO_PKG_VERSION"),
    env: format!("{:?}", state.config.env).to_lowercase(),
  })
}

pub(crate) async fn prometheus<F: Fetcher>(State(state): State<AppState<F>>) -> axum::response::Response {
  match &state.prometheus {
    Some(handle) => handle.render().into_response(),
    None => StatusCode::NOT_FOUND.into_response(),
  }
}

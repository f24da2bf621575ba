use axum::{
  Router,
  middleware,
  routing::{get, post},
};
use jiff::Span;
use libaffina::prelude::*;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use crate::{api::config::Config, trace};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

#[derive(Clone)]
pub struct AppState<F: Fetcher> {
  pub config: Config,
  pub prometheus: Option<PrometheusHandle>,
  pub affina: Affina<F>,
}

pub async fn routes<F: Fetcher>(config: &Config, fetcher: F) -> anyhow::Result<Router> {
  let affina = Affina::new(fetcher)
    .config(AffinaConfig {
      content_ttl: Span::new().seconds(config.content_ttl_secs),
    })
    .build()
    .await;

  tokio::spawn({
    let affina = affina.clone();
    let interval = config.refresh_interval;

    async move {
      loop {
        tokio::time::sleep(interval).await;

        affina.refresh().await;
      }
    }
  });

  let prometheus = match config.enable_prometheus {
    true => Some(trace::build_prometheus()?),
    false => None,
  };

  let state = AppState {
    config: config.clone(),
    prometheus,
    affina,
  };

  Ok(
    Router::new()
      .route("/records", get(handlers::list_records).post(handlers::add_record))
      .route("/records/{id}/related", get(handlers::related_records))
      .route("/matches", post(handlers::find_matches))
      .route("/content", get(handlers::list_content))
      .fallback(handlers::not_found)
      .layer(TraceLayer::new_for_http().make_span_with(middlewares::create_request_span))
      // The routes below will not go through the observability middlewares above
      .route("/version", get(handlers::version))
      .route("/healthz", get(handlers::healthz))
      .route("/readyz", get(handlers::readyz))
      .route("/metrics", get(handlers::prometheus))
      .layer(middleware::from_fn(middlewares::logging::api_logger))
      .layer(middleware::from_fn(middlewares::request_id))
      .layer(middleware::from_fn(middlewares::metrics))
      .with_state(state),
  )
}

#[derive(Debug, thiserror::Error)]
pub enum AffinaError {
  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("unknown category: {0}")]
  InvalidCategory(String),
  #[error("resource not found")]
  ResourceNotFound,
  #[error(transparent)]
  FetchError(#[from] reqwest::Error),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}

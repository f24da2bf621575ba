use std::{
  env::{self, VarError},
  fmt::Display,
  str::FromStr,
  time::Duration,
};

use crate::api::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,

  // Remote data source
  pub api_base_url: String,
  pub fetch_timeout: Duration,
  pub refresh_interval: Duration,
  pub content_ttl_secs: i64,

  // Debugging
  pub enable_prometheus: bool,
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or("0.0.0.0:8000".into()),
      api_base_url: env::var("API_URL").unwrap_or("https://socio-99.onrender.com/api".into()),
      fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT", 3)?),
      refresh_interval: Duration::from_secs(parse_env("REFRESH_INTERVAL", 300)?),
      content_ttl_secs: parse_env("CONTENT_TTL", 3600)?,
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
    };

    if config.fetch_timeout.is_zero() {
      return Err(AppError::ConfigError("FETCH_TIMEOUT must be at least one second".into()));
    }

    Ok(config)
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> anyhow::Result<T>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => Ok(value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}")))?),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}")).into()),
    },
  }
}

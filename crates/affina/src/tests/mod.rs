use std::time::Duration;

use libaffina::prelude::*;

use crate::api::{
  AppState,
  config::{Config, Env},
};


fn test_config() -> Config {
  Config {
    env: Env::Dev,
    listen_addr: "127.0.0.1:0".into(),
    api_base_url: "http://localhost:9".into(),
    fetch_timeout: Duration::from_secs(1),
    refresh_interval: Duration::from_secs(300),
    content_ttl_secs: 3600,
    enable_prometheus: false,
  }
}

pub(crate) async fn state_with(fetcher: StaticFetcher) -> AppState<StaticFetcher> {
  AppState {
    config: test_config(),
    prometheus: None,
    affina: Affina::new(fetcher).build().await,
  }
}

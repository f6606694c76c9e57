//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError};
use serde::Deserialize;

fn default_timeout() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the binaries talking to the package backend.
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `https://club.example.com/api`.
    pub api_base_url: String,
    /// Business the packages are created for.
    pub business_id: i32,
    /// Bearer token of the signed-in business account.
    pub access_token: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Loads `config/default.yaml`, the `APP_ENV` profile and `APP_*`
    /// environment overrides, in that order.
    pub fn load() -> Result<Self, ConfigError> {
        // Select config profile (defaults to `local`).
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}

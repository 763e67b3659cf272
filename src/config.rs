//! Process configuration, loaded once from the environment.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Runtime configuration. Every field can be overridden through a
/// `VERIDIAN_`-prefixed environment variable, e.g. `VERIDIAN_DATABASE_URL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    pub proxy: Option<Url>,
    /// Web API key of the Firebase project.
    pub firebase_api_key: String,
    /// Base URL of the identitytoolkit REST surface. Point this at the
    /// Firebase Auth emulator in development, e.g.
    /// `http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1`.
    pub firebase_base_url: Url,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:veridian.sqlite".to_string(),
            loglevel: "info".to_string(),
            proxy: None,
            firebase_api_key: String::new(),
            firebase_base_url: Url::parse("https://identitytoolkit.googleapis.com/v1")
                .expect("FATAL: default firebase base URL is invalid"),
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("VERIDIAN_"))
        .extract()
        .expect("FATAL: invalid configuration in environment")
});

//! Settings / Configuration.

use anyhow::Result;
use config::{Config, ConfigError, Environment, File, Map, Source, Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::paths::{config_file, default_credentials_file};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the company API, every resource path is relative to it
    pub api_endpoint: Url,
    /// Where the persisted session token lives
    pub credentials_file: PathBuf,
    /// Route users are sent to when their session expired
    pub login_route: String,
    /// Per-request timeout in milliseconds, 0 disables it
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: Url::parse("http://localhost:7470/company")
                .expect("Valid hardcoded server URL"),
            credentials_file: default_credentials_file(),
            login_route: "/login".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl Settings {
    /// Load from the platform config file, overridden by `TALENTDESK_*` environment variables.
    ///
    /// e.g. `api_endpoint = "..."` can be overridden with `TALENTDESK_API_ENDPOINT="..."`
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = Config::builder()
            .add_source(DefaultImplSource::<Settings>::new())
            .add_source(File::with_name(&path.display().to_string()).required(false))
            .add_source(
                Environment::with_prefix("TALENTDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(s.try_deserialize()?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms != 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

// Loading without a config file still needs every field, so the values from
// `Settings::default()` are fed in as the lowest layer. `config` can't take a
// serde value directly; it's round-tripped through `toml::Value` and converted.

struct DefaultImplSource<T: Default>(PhantomData<T>);

impl<T: Default> Clone for DefaultImplSource<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: Default> std::fmt::Debug for DefaultImplSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DefaultImplSource").finish()
    }
}

impl<T: Default> DefaultImplSource<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Default + Serialize + Send + Sync + 'static> Source for DefaultImplSource<T> {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let toml_value =
            toml::Value::try_from(T::default()).map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        match from_toml_value(&toml_value).kind {
            ValueKind::Table(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

fn from_toml_value(value: &toml::Value) -> Value {
    match *value {
        toml::Value::String(ref value) => Value::new(None, value.to_string()),
        toml::Value::Float(value) => Value::new(None, value),
        toml::Value::Integer(value) => Value::new(None, value),
        toml::Value::Boolean(value) => Value::new(None, value),

        toml::Value::Table(ref table) => {
            let mut m = Map::new();

            for (key, value) in table {
                m.insert(key.clone(), from_toml_value(value));
            }

            Value::new(None, m)
        }

        toml::Value::Array(ref array) => {
            let mut l = Vec::new();

            for value in array {
                l.push(from_toml_value(value));
            }

            Value::new(None, l)
        }

        toml::Value::Datetime(ref datetime) => Value::new(None, datetime.to_string()),
    }
}

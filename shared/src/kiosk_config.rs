use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::constants::*;
use crate::transport::{CallId, Params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingStore,
    MissingSecret(String),
    BadEndpoint(String),
    Unreadable(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingStore => write!(f, "{}", LAUNCH_URL_HINT),
            ConfigError::MissingSecret(store) => {
                write!(f, "No StoreSecret configured for {}", store)
            }
            ConfigError::BadEndpoint(reason) => write!(f, "API URL is not usable: {}", reason),
            ConfigError::Unreadable(reason) => write!(f, "Kiosk configuration is invalid: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Unreadable(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeMode {
    #[default]
    Auto,
    Direct,
    Callback,
}

/// How responses reach the kiosk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The response body is read directly.
    Direct,
    /// The endpoint answers with script invoking a named global callback.
    Callback,
}

impl ExchangeMode {
    /// Direct reads only work when the endpoint is same-origin with the page;
    /// anywhere else the callback exchange is the one that gets through.
    pub fn resolve(self, endpoint: &Endpoint, page_origin: Option<&str>) -> Delivery {
        match self {
            ExchangeMode::Direct => Delivery::Direct,
            ExchangeMode::Callback => Delivery::Callback,
            ExchangeMode::Auto => match page_origin {
                Some(origin) if endpoint.origin() == origin.trim_end_matches('/') => Delivery::Direct,
                _ => Delivery::Callback,
            },
        }
    }
}

/// Static settings baked into the kiosk build.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskConfig {
    pub api_url: String,
    #[serde(default)]
    pub endpoint_suffix: Option<String>,
    #[serde(default)]
    pub store_secrets: HashMap<String, String>,
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_spin_floor_ms")]
    pub spin_floor_ms: u64,
    #[serde(default = "default_full_turns")]
    pub full_turns: u32,
    #[serde(default)]
    pub exchange: ExchangeMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_spin_floor_ms() -> u64 {
    DEFAULT_SPIN_FLOOR_MS
}

fn default_full_turns() -> u32 {
    DEFAULT_FULL_TURNS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl KioskConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn secret_for(&self, store_id: &str) -> Option<&str> {
        self.store_secrets
            .get(store_id)
            .map(String::as_str)
            .filter(|secret| !secret.trim().is_empty())
    }

    pub fn endpoint(&self) -> Result<Endpoint, ConfigError> {
        Endpoint::parse(&self.api_url, self.endpoint_suffix.as_deref())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn spin_settings(&self) -> SpinSettings {
        SpinSettings {
            spin_floor: Duration::from_millis(self.spin_floor_ms),
            call_timeout: self.call_timeout(),
            full_turns: self.full_turns,
            currency: self.currency_symbol.clone(),
        }
    }
}

/// Knobs of the spin state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSettings {
    pub spin_floor: Duration,
    pub call_timeout: Duration,
    pub full_turns: u32,
    pub currency: String,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            spin_floor: Duration::from_millis(DEFAULT_SPIN_FLOOR_MS),
            call_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            full_turns: DEFAULT_FULL_TURNS,
            currency: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// A remote endpoint that passed the startup syntax check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    pub fn parse(raw: &str, required_suffix: Option<&str>) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let url = Url::parse(raw).map_err(|e| ConfigError::BadEndpoint(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::BadEndpoint(format!("unsupported scheme {}", url.scheme())));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::BadEndpoint("missing host".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::BadEndpoint("must not carry a query or fragment".to_string()));
        }
        if let Some(suffix) = required_suffix.filter(|s| !s.is_empty()) {
            if !url.path().ends_with(suffix) {
                return Err(ConfigError::BadEndpoint(format!("path must end with {}", suffix)));
            }
        }

        Ok(Self { url })
    }

    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Builds the GET url for one call: `action` first, then the parameters
    /// in key order, then the callback name when one is used.
    pub fn request_url(&self, action: &str, params: &Params, callback: Option<&CallId>) -> Url {
        let mut url = self.url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action);
            for (key, value) in params.iter() {
                query.append_pair(key, &value.to_string());
            }
            if let Some(id) = callback {
                query.append_pair(CALLBACK_PARAM, id.as_str());
            }
        }
        url
    }
}

use std::cell::RefCell;
use std::collections::HashMap;

use url::form_urlencoded;
use uuid::Uuid;

use crate::constants::{DEVICE_ID_KEY, DEVICE_PARAM, STORE_PARAM};
use crate::kiosk_config::{ConfigError, KioskConfig};
use crate::transport::Params;

/// Who is calling: resolved once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub store_id: String,
    pub store_secret: String,
    pub device_id: String,
}

impl SessionContext {
    /// The identity parameters every action carries.
    pub fn params(&self) -> Params {
        Params::new()
            .text("storeId", &self.store_id)
            .text("storeSecret", &self.store_secret)
            .text("deviceId", &self.device_id)
    }
}

/// Parameters the kiosk page was opened with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchParams {
    pub store: Option<String>,
    pub device: Option<String>,
}

impl LaunchParams {
    /// Parses a query string such as `?store=CL-001&device=TAB-01`. Names are
    /// case-insensitive, the first occurrence wins and blank values are
    /// ignored.
    pub fn from_query(query: &str) -> Self {
        let mut launch = Self::default();
        let query = query.trim_start_matches('?');
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = if key.eq_ignore_ascii_case(STORE_PARAM) {
                &mut launch.store
            } else if key.eq_ignore_ascii_case(DEVICE_PARAM) {
                &mut launch.device
            } else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        launch
    }
}

/// Persistent string storage on the device.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Session-only storage, used when the browser offers none.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// Launch parameter first (and remembered), then the remembered id, then a
/// freshly generated one that is remembered from now on.
pub fn resolve_device_id(launch: &LaunchParams, store: &dyn KeyValueStore) -> String {
    if let Some(device) = &launch.device {
        store.set(DEVICE_ID_KEY, device);
        return device.clone();
    }
    if let Some(saved) = store.get(DEVICE_ID_KEY).filter(|id| !id.trim().is_empty()) {
        return saved;
    }
    let generated = generate_device_id();
    log::info!("No device id configured, generated {}", generated);
    store.set(DEVICE_ID_KEY, &generated);
    generated
}

fn generate_device_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("TAB-{}", simple[..8].to_uppercase())
}

pub fn resolve_session(
    launch: &LaunchParams,
    config: &KioskConfig,
    store: &dyn KeyValueStore,
) -> Result<SessionContext, ConfigError> {
    let store_id = launch.store.clone().ok_or(ConfigError::MissingStore)?;
    let store_secret = config
        .secret_for(&store_id)
        .ok_or_else(|| ConfigError::MissingSecret(store_id.clone()))?
        .to_string();
    let device_id = resolve_device_id(launch, store);

    Ok(SessionContext { store_id, store_secret, device_id })
}

use std::fmt;

use crate::constants::ACTION_GET_CONFIG;
use crate::failure::Failure;
use crate::kiosk_config::{ConfigError, Endpoint, KioskConfig};
use crate::session::{resolve_session, KeyValueStore, LaunchParams, SessionContext};
use crate::shared_spin_wheel::StoreConfig;
use crate::transport::{Exchange, Timer, Transport};

#[derive(Debug, Clone, PartialEq)]
pub enum BootError {
    Config(ConfigError),
    Rejected(Failure),
    MalformedConfig(String),
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::Config(e) => write!(f, "{}", e),
            BootError::Rejected(failure) => write!(f, "getconfig failed: {}", failure),
            BootError::MalformedConfig(reason) => write!(f, "store configuration unreadable: {}", reason),
        }
    }
}

impl std::error::Error for BootError {}

impl From<ConfigError> for BootError {
    fn from(err: ConfigError) -> Self {
        BootError::Config(err)
    }
}

impl From<Failure> for BootError {
    fn from(failure: Failure) -> Self {
        BootError::Rejected(failure)
    }
}

/// Everything a spin needs, available once bootstrap succeeds.
pub struct Booted<X, T> {
    pub session: SessionContext,
    pub store: StoreConfig,
    pub transport: Transport<X, T>,
}

/// Runs the startup sequence. Each step is fatal on failure and nothing is
/// retried; `connect` is only invoked once the endpoint has been validated.
pub async fn bootstrap<X, T, F>(
    launch: &LaunchParams,
    config: &KioskConfig,
    devices: &dyn KeyValueStore,
    connect: F,
) -> Result<Booted<X, T>, BootError>
where
    X: Exchange,
    T: Timer,
    F: FnOnce(Endpoint) -> Transport<X, T>,
{
    let session = resolve_session(launch, config, devices)?;
    let endpoint = config.endpoint()?;
    log::info!("Booting kiosk for store {} on device {}", session.store_id, session.device_id);

    let transport = connect(endpoint);
    let reply = transport
        .call(ACTION_GET_CONFIG, &session.params(), config.call_timeout())
        .await?;
    let store = StoreConfig::from_value(reply).map_err(|e| BootError::MalformedConfig(e.to_string()))?;
    log::info!(
        "Loaded {} with {} prizes, qualify amount {}",
        store.store.name,
        store.prizes.len(),
        store.qualify_amount()
    );

    Ok(Booted { session, store, transport })
}

use kiosk_shared::{ConfigError, KioskConfig, LaunchParams};
use web_sys::window;

const KIOSK_JSON: &str = include_str!("../kiosk.json");

pub fn load_kiosk_config() -> Result<KioskConfig, ConfigError> {
    KioskConfig::from_json(KIOSK_JSON)
}

/// Level for `wasm_logger`; unknown names fall back to `info`.
pub fn log_level(config: Result<&KioskConfig, &ConfigError>) -> log::Level {
    config
        .ok()
        .and_then(|config| config.log_level.parse().ok())
        .unwrap_or(log::Level::Info)
}

/// `?store=...&device=...` from the address the kiosk was opened with.
pub fn launch_params() -> LaunchParams {
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    LaunchParams::from_query(&search)
}

pub fn page_origin() -> Option<String> {
    window().and_then(|w| w.location().origin().ok())
}

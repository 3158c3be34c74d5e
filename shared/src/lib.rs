pub mod bootstrap;
pub mod constants;
pub mod eligibility;
pub mod failure;
pub mod form;
pub mod kiosk_config;
pub mod orchestrator;
pub mod presenter;
pub mod session;
pub mod shared_spin_wheel;
pub mod transport;
pub mod validation;

#[cfg(test)]
mod test_helpers;

pub use bootstrap::{bootstrap, BootError, Booted};
pub use eligibility::{evaluate, Eligibility, GateReason};
pub use failure::{Failure, FailureKind};
pub use form::SpinFormData;
pub use kiosk_config::{ConfigError, Delivery, Endpoint, ExchangeMode, KioskConfig, SpinSettings};
pub use orchestrator::{KioskSurface, SpinOrchestrator, SpinPhase};
pub use presenter::{present, present_setup_failure, Presentation, Tone};
pub use session::{KeyValueStore, LaunchParams, MemoryStore, SessionContext};
pub use shared_spin_wheel::{StoreConfig, Wedge};
pub use transport::{CallId, CallResult, Exchange, Params, PendingCall, Timer, Transport};

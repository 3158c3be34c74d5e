use crate::bootstrap::BootError;
use crate::constants::{GENERIC_RETRY_ERROR, UNKNOWN_VERSION};
use crate::failure::{Failure, FailureKind};
use crate::kiosk_config::ConfigError;
use crate::shared_spin_wheel::{format_amount, SpinOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Celebrate,
    Neutral,
    Problem,
}

/// What the result modal shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub title: String,
    pub body: String,
    pub tone: Tone,
}

impl Presentation {
    fn new(title: &str, body: String, tone: Tone) -> Self {
        Self { title: title.to_string(), body, tone }
    }
}

pub fn failure_message(kind: &FailureKind) -> Option<&'static str> {
    let message = match kind {
        FailureKind::BadSecret => "This tablet's store secret was rejected. Ask a manager to check the kiosk setup.",
        FailureKind::BadPin => "The cashier PIN is incorrect. Ask the cashier to re-enter it.",
        FailureKind::ConsentRequired => "Both consent boxes must be ticked before spinning.",
        FailureKind::MissingFields => "Some details are missing. Complete every field and try again.",
        FailureKind::RateLimit => "Too many spins right now. Wait a moment, then press spin again.",
        FailureKind::StoreNotFound => "This store is not registered for the promotion.",
        FailureKind::Network => "Could not reach the spin service. Check the connection, then press spin to retry.",
        FailureKind::Timeout => "The spin service took too long to answer. Press spin to retry.",
        FailureKind::Other(_) => return None,
    };
    Some(message)
}

/// Online indicator change implied by a failure, if any.
pub fn online_after_failure(failure: &Failure) -> Option<bool> {
    failure.kind.is_transport().then_some(false)
}

fn failure_body(failure: &Failure) -> String {
    let detail = failure.detail.as_deref().filter(|d| !d.trim().is_empty());
    let mut body = match (failure_message(&failure.kind), detail) {
        (Some(message), Some(detail)) => format!("{}\n{}", message, detail),
        (Some(message), None) => message.to_string(),
        (None, Some(detail)) => detail.to_string(),
        (None, None) => GENERIC_RETRY_ERROR.to_string(),
    };
    if let Some(version) = &failure.version {
        body.push_str(&format!("\n\nVersion: {}", version));
    }
    body
}

/// Maps a settled spin to modal content. `fallback_threshold` fills in a
/// no-win reply that omitted its qualify amount.
pub fn present(outcome: &SpinOutcome, currency: &str, fallback_threshold: f64) -> Presentation {
    match outcome {
        SpinOutcome::Win { prize_name, prize_code } => Presentation::new(
            "YOU WON!",
            format!(
                "Prize: {}\n\nCode: {}\n\nWe emailed your code.\nKeep your receipt.",
                prize_name, prize_code
            ),
            Tone::Celebrate,
        ),
        SpinOutcome::GrandEntry { prize_name, prize_code } => Presentation::new(
            "YOU'RE IN THE DRAW!",
            format!(
                "Entry: {}\n\nEntry Code: {}\n\nWe emailed your code.\nDrop your receipt in the draw box.",
                prize_name, prize_code
            ),
            Tone::Celebrate,
        ),
        SpinOutcome::NoWin { qualify_amount } => Presentation::new(
            "NOT THIS TIME…",
            format!(
                "No prize on this spin.\n\nSpend {}+ again to qualify.\nMore spend = more chances.",
                format_amount(currency, qualify_amount.unwrap_or(fallback_threshold))
            ),
            Tone::Neutral,
        ),
        SpinOutcome::Failure(failure) => Presentation::new("Spin blocked", failure_body(failure), Tone::Problem),
    }
}

/// Blocking message for a bootstrap that could not finish.
pub fn present_setup_failure(error: &BootError) -> Presentation {
    match error {
        BootError::Config(config) => {
            let title = match config {
                ConfigError::MissingStore => "Missing store",
                ConfigError::MissingSecret(_) => "Missing secret",
                ConfigError::BadEndpoint(_) => "Bad API URL",
                ConfigError::Unreadable(_) => "Bad kiosk config",
            };
            Presentation::new(title, config.to_string(), Tone::Problem)
        }
        BootError::Rejected(failure) => {
            let body = format!(
                "{}\n{}\n\nVersion: {}",
                failure.kind,
                failure.detail.as_deref().unwrap_or(""),
                failure.version.as_deref().unwrap_or(UNKNOWN_VERSION)
            );
            Presentation::new("Setup blocked", body, Tone::Problem)
        }
        BootError::MalformedConfig(reason) => {
            Presentation::new("Setup blocked", format!("Store configuration is unreadable.\n{}", reason), Tone::Problem)
        }
    }
}

use crate::constants::{INVALID_EMAIL_ERROR, INVALID_PHONE_ERROR};
use crate::form::SpinFormData;
use crate::shared_spin_wheel::{format_amount, StoreConfig};
use crate::validation::{validate_email, validate_phone};

/// Why a spin is, or is not, currently allowed. Variants are listed in the
/// order the checks run.
#[derive(Debug, Clone, PartialEq)]
pub enum GateReason {
    Loading,
    IncompleteFields,
    InvalidEmail,
    InvalidPhone,
    ConsentRequired,
    BelowThreshold { qualify_amount: f64 },
    Ready,
}

/// Which input a field-level hint belongs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    Phone,
}

impl GateReason {
    pub fn status_message(&self, currency: &str) -> String {
        match self {
            GateReason::Loading => "Loading store rules…".to_string(),
            GateReason::IncompleteFields => "Complete all fields to spin".to_string(),
            GateReason::InvalidEmail => "Fix email to continue".to_string(),
            GateReason::InvalidPhone => "Fix phone to continue".to_string(),
            GateReason::ConsentRequired => "Consent required to spin".to_string(),
            GateReason::BelowThreshold { qualify_amount } => {
                format!("Not qualified. Min {}", format_amount(currency, *qualify_amount))
            }
            GateReason::Ready => "Ready to spin".to_string(),
        }
    }

    pub fn wheel_caption(&self) -> &'static str {
        match self {
            GateReason::Ready => "Tap SPIN to play",
            _ => "Fill in all details to unlock",
        }
    }

    pub fn field_hint(&self) -> Option<(FormField, &'static str)> {
        match self {
            GateReason::InvalidEmail => Some((FormField::Email, INVALID_EMAIL_ERROR)),
            GateReason::InvalidPhone => Some((FormField::Phone, INVALID_PHONE_ERROR)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Eligibility {
    pub eligible: bool,
    pub reason: GateReason,
}

impl Eligibility {
    pub fn loading() -> Self {
        Self::blocked(GateReason::Loading)
    }

    fn blocked(reason: GateReason) -> Self {
        Self { eligible: false, reason }
    }
}

/// Decides whether the current form may be spun. The first failing check
/// names the reason.
pub fn evaluate(form: &SpinFormData, config: Option<&StoreConfig>) -> Eligibility {
    let Some(config) = config else {
        return Eligibility::loading();
    };
    if form.has_missing_fields() {
        return Eligibility::blocked(GateReason::IncompleteFields);
    }
    if validate_email(&form.email).is_err() {
        return Eligibility::blocked(GateReason::InvalidEmail);
    }
    if validate_phone(&form.phone_digits()).is_err() {
        return Eligibility::blocked(GateReason::InvalidPhone);
    }
    if !form.consents_given() {
        return Eligibility::blocked(GateReason::ConsentRequired);
    }

    let qualify_amount = config.qualify_amount();
    match form.amount() {
        Some(amount) if amount >= qualify_amount => Eligibility { eligible: true, reason: GateReason::Ready },
        _ => Eligibility::blocked(GateReason::BelowThreshold { qualify_amount }),
    }
}

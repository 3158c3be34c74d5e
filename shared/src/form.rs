use serde::{Deserialize, Serialize};

use crate::session::SessionContext;
use crate::transport::Params;
use crate::validation::sanitize_phone;

/// What the customer and cashier have typed, exactly as the inputs hold it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SpinFormData {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub receipt_number: String,
    pub basket_amount: String,
    pub cashier_pin: String,
    pub popia_consent: bool,
    pub marketing_consent: bool,
}

impl SpinFormData {
    /// A finite, non-zero basket amount; anything else counts as not entered.
    pub fn amount(&self) -> Option<f64> {
        self.basket_amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount != 0.0)
    }

    pub fn phone_digits(&self) -> String {
        sanitize_phone(&self.phone)
    }

    pub fn has_missing_fields(&self) -> bool {
        [
            self.name.as_str(),
            self.surname.as_str(),
            self.email.as_str(),
            self.receipt_number.as_str(),
            self.cashier_pin.as_str(),
        ]
        .iter()
        .any(|field| field.trim().is_empty())
            || self.phone_digits().is_empty()
            || self.amount().is_none()
    }

    pub fn consents_given(&self) -> bool {
        self.popia_consent && self.marketing_consent
    }

    /// Request parameters for the `spin` action. Text is trimmed and the phone
    /// number is sent as digits only.
    pub fn spin_params(&self, session: &SessionContext) -> Params {
        session
            .params()
            .text("name", self.name.trim())
            .text("surname", self.surname.trim())
            .text("email", self.email.trim())
            .text("phone", self.phone_digits())
            .text("receiptNumber", self.receipt_number.trim())
            .number("basketAmount", self.amount().unwrap_or(0.0))
            .text("cashierPin", self.cashier_pin.trim())
            .flag("popia", self.popia_consent)
            .flag("marketing", self.marketing_consent)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::{complete_form, session};
    use crate::transport::ParamValue;

    #[test]
    fn test_amount_parsing() {
        let mut form = complete_form("150");
        assert_eq!(form.amount(), Some(150.0));
        form.basket_amount = " 99.90 ".into();
        assert_eq!(form.amount(), Some(99.9));
        form.basket_amount = "0".into();
        assert_eq!(form.amount(), None);
        form.basket_amount = "abc".into();
        assert_eq!(form.amount(), None);
        form.basket_amount = "".into();
        assert_eq!(form.amount(), None);
    }

    #[test]
    fn test_whitespace_only_fields_are_missing() {
        let mut form = complete_form("150");
        assert!(!form.has_missing_fields());
        form.cashier_pin = "   ".into();
        assert!(form.has_missing_fields());

        let mut form = complete_form("150");
        form.phone = "---".into();
        assert!(form.has_missing_fields());
    }

    #[test]
    fn test_spin_params_are_trimmed_and_sanitized() {
        let mut form = complete_form("150");
        form.name = "  Thandi ".into();
        form.phone = "082 555 1234".into();
        form.marketing_consent = false;

        let params = form.spin_params(&session());
        assert_eq!(params.get("name"), Some(&ParamValue::Text("Thandi".into())));
        assert_eq!(params.get("phone"), Some(&ParamValue::Text("0825551234".into())));
        assert_eq!(params.get("basketAmount"), Some(&ParamValue::Number(150.0)));
        assert_eq!(params.get("popia"), Some(&ParamValue::Text("true".into())));
        assert_eq!(params.get("marketing"), Some(&ParamValue::Text("false".into())));
        assert_eq!(params.get("storeId"), Some(&ParamValue::Text("CL-001".into())));
        assert_eq!(params.get("deviceId"), Some(&ParamValue::Text("TAB-A9-HIGHVELD-01".into())));
    }
}

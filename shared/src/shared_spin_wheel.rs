use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::failure::Failure;
use crate::transport::CallResult;

/// Store rules and prizes returned by `getconfig`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    pub store: StoreInfo,
    #[serde(default)]
    pub prizes: Vec<Prize>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub qualify_amount: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One of the fixed segments drawn on the wheel
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub image_url: Option<String>,
}

impl Wedge {
    fn filler() -> Self {
        Self { label: FILLER_LABEL.to_string(), image_url: None }
    }
}

impl StoreConfig {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn qualify_amount(&self) -> f64 {
        self.store.qualify_amount
    }

    pub fn wedges(&self) -> Vec<Wedge> {
        wedges(&self.prizes)
    }
}

/// Result of an accepted spin, or the reason it produced none.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Win { prize_name: String, prize_code: String },
    GrandEntry { prize_name: String, prize_code: String },
    NoWin { qualify_amount: Option<f64> },
    Failure(Failure),
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SpinReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    prize_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    prize_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    qualify_amount: Option<f64>,
}

impl SpinOutcome {
    pub fn from_call(result: CallResult) -> Self {
        let value = match result {
            Ok(value) => value,
            Err(failure) => return Self::Failure(failure),
        };
        let reply: SpinReply = match serde_json::from_value(value) {
            Ok(reply) => reply,
            Err(e) => return Self::Failure(Failure::bad_response(e.to_string())),
        };

        let prize_name = reply.prize_name.unwrap_or_default();
        let prize_code = reply.prize_code.unwrap_or_default();
        match reply.result.as_ref().and_then(Value::as_str) {
            Some("Win") => Self::Win { prize_name, prize_code },
            Some("GrandEntry") => Self::GrandEntry { prize_name, prize_code },
            _ => Self::NoWin { qualify_amount: reply.qualify_amount },
        }
    }
}

// Wheel layout
pub const WHEEL_SEGMENTS: usize = 10;
pub const FILLER_LABEL: &str = "TRY AGAIN";

const DEMO_LABELS: [&str; WHEEL_SEGMENTS] = [
    "FREE CHIPS", "TRY AGAIN", "TRY AGAIN", "FREE WINGS", "TRY AGAIN",
    "TRY AGAIN", "TRY AGAIN", "DRAW ENTRY", "TRY AGAIN", "GRAND DRAW",
];

/// Exactly `WHEEL_SEGMENTS` wedges: the first prizes in order, padded with
/// filler wedges.
pub fn wedges(prizes: &[Prize]) -> Vec<Wedge> {
    let mut wedges: Vec<Wedge> = prizes
        .iter()
        .take(WHEEL_SEGMENTS)
        .map(|prize| {
            let label = prize.name.trim();
            Wedge {
                label: if label.is_empty() { FILLER_LABEL.to_string() } else { label.to_string() },
                image_url: prize
                    .image_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(str::to_string),
            }
        })
        .collect();
    wedges.resize_with(WHEEL_SEGMENTS, Wedge::filler);
    wedges
}

/// Shown until the store configuration has been fetched.
pub fn demo_wedges() -> Vec<Wedge> {
    DEMO_LABELS
        .iter()
        .map(|label| Wedge { label: label.to_string(), image_url: None })
        .collect()
}

/// Splits a wedge label into two upper-cased lines: the first two words, then
/// the rest.
pub fn label_lines(label: &str) -> (String, Option<String>) {
    let words: Vec<&str> = label.split_whitespace().collect();
    let split = words.len().min(2);
    let first = words[..split].join(" ").to_uppercase();
    let rest = words[split..].join(" ").to_uppercase();
    (first, if rest.is_empty() { None } else { Some(rest) })
}

/// Adds `full_turns` rotations plus a random offset to the current angle.
pub fn next_rotation<R: Rng + ?Sized>(current: f64, full_turns: u32, rng: &mut R) -> f64 {
    current + f64::from(full_turns) * 360.0 + rng.gen_range(0.0..360.0)
}

/// Formats an amount the way the store signage does, e.g. `R100` or `R99.50`.
pub fn format_amount(currency: &str, amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}{}", currency, amount)
    } else {
        format!("{}{:.2}", currency, amount)
    }
}

fn amount_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|amount| amount.is_finite())
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Sheet-backed endpoints send codes as numbers
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_from_value))
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    amount_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("qualifyAmount is not a number: {}", value)))
}

fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value))
}

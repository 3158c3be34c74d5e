use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::channel::oneshot;
use futures::future::{self, Either, LocalBoxFuture};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::failure::{Failure, FailureKind};
use crate::kiosk_config::{Delivery, Endpoint};

pub type CallResult = Result<Value, Failure>;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Request parameters, kept in key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), ParamValue::Text(value.into()));
        self
    }

    pub fn number(mut self, key: &str, value: f64) -> Self {
        self.0.insert(key.to_string(), ParamValue::Number(value));
        self
    }

    /// Booleans travel as the strings `"true"` and `"false"`.
    pub fn flag(self, key: &str, value: bool) -> Self {
        self.text(key, if value { "true" } else { "false" })
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Correlates a dispatched request with its response. Doubles as the name of
/// the global callback in the callback exchange, so it is a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallId(String);

impl CallId {
    pub fn fresh() -> Self {
        CallId(format!("cb_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CallId {
    fn from(id: &str) -> Self {
        CallId(id.to_string())
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type Registry = HashMap<CallId, oneshot::Sender<CallResult>>;

/// The handle an exchange uses to hand a response back to the waiting call.
/// Only the first delivery for a call id counts; anything after that, or
/// after the call timed out, is dropped.
#[derive(Clone)]
pub struct PendingCall {
    id: CallId,
    registry: Weak<RefCell<Registry>>,
}

impl PendingCall {
    pub fn id(&self) -> &CallId {
        &self.id
    }

    /// Returns whether the result reached the waiting caller.
    pub fn resolve(&self, result: CallResult) -> bool {
        let sender = match self.registry.upgrade() {
            Some(registry) => {
                let mut pending = registry.borrow_mut();
                pending.remove(&self.id)
            }
            None => None,
        };
        match sender {
            Some(sender) => sender.send(result).is_ok(),
            None => {
                log::debug!("Discarding late response for {}", self.id);
                false
            }
        }
    }
}

/// Puts one request on the wire and reports back through the `PendingCall`.
pub trait Exchange {
    fn delivery(&self) -> Delivery;

    fn dispatch(&self, url: Url, call: PendingCall);

    /// Drops whatever the exchange registered for this call. Runs exactly once
    /// per call on every resolution path.
    fn release(&self, _id: &CallId) {}
}

pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

impl<X: Exchange + ?Sized> Exchange for Rc<X> {
    fn delivery(&self) -> Delivery {
        (**self).delivery()
    }

    fn dispatch(&self, url: Url, call: PendingCall) {
        (**self).dispatch(url, call)
    }

    fn release(&self, id: &CallId) {
        (**self).release(id)
    }
}

impl<T: Timer + ?Sized> Timer for Rc<T> {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        (**self).sleep(duration)
    }
}

pub struct Transport<X, T> {
    endpoint: Endpoint,
    exchange: X,
    timer: T,
    pending: Rc<RefCell<Registry>>,
}

impl<X: Exchange, T: Timer> Transport<X, T> {
    pub fn new(endpoint: Endpoint, exchange: X, timer: T) -> Self {
        Self {
            endpoint,
            exchange,
            timer,
            pending: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Calls currently waiting for a response.
    pub fn in_flight(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Sends one request and waits at most `timeout` for its answer. Never
    /// retries.
    pub async fn call(&self, action: &str, params: &Params, timeout: Duration) -> CallResult {
        let id = CallId::fresh();
        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().insert(id.clone(), sender);

        let callback = match self.exchange.delivery() {
            Delivery::Callback => Some(&id),
            Delivery::Direct => None,
        };
        let url = self.endpoint.request_url(action, params, callback);
        log::debug!("Dispatching {} as {}", action, id);
        self.exchange.dispatch(
            url,
            PendingCall { id: id.clone(), registry: Rc::downgrade(&self.pending) },
        );

        let outcome = match future::select(receiver, self.timer.sleep(timeout)).await {
            Either::Left((Ok(result), _)) => result,
            Either::Left((Err(oneshot::Canceled), _)) => {
                Err(Failure::network("Call was abandoned before a response arrived"))
            }
            Either::Right(((), _)) => {
                log::warn!("{} timed out after {:?}", action, timeout);
                Err(Failure::timeout())
            }
        };

        self.pending.borrow_mut().remove(&id);
        self.exchange.release(&id);

        outcome.and_then(decode_envelope)
    }
}

/// Splits the `{ ok, error, detail, _version }` envelope into success or a
/// typed failure.
pub fn decode_envelope(value: Value) -> CallResult {
    let ok = value.get("ok").and_then(Value::as_bool);
    match ok {
        Some(true) => Ok(value),
        Some(false) => {
            let text = |key: &str| {
                value
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .filter(|s| !s.is_empty())
            };
            let kind = text("error")
                .map(|code| FailureKind::from_code(&code))
                .unwrap_or_else(|| FailureKind::Other("unknown_error".to_string()));
            Err(Failure { kind, detail: text("detail"), version: text("_version") })
        }
        None => Err(Failure::bad_response("Response has no ok flag")),
    }
}

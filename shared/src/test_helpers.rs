use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use serde_json::{json, Value};
use tokio::time::Instant;
use url::Url;

use crate::eligibility::Eligibility;
use crate::failure::Failure;
use crate::form::SpinFormData;
use crate::kiosk_config::{Delivery, Endpoint, KioskConfig};
use crate::orchestrator::KioskSurface;
use crate::presenter::Presentation;
use crate::session::SessionContext;
use crate::shared_spin_wheel::StoreConfig;
use crate::transport::{CallId, Exchange, PendingCall, Timer};

pub const API_URL: &str = "https://script.google.com/macros/s/AKfycb/exec";

pub fn complete_form(amount: &str) -> SpinFormData {
    SpinFormData {
        name: "Thandi".into(),
        surname: "Nkosi".into(),
        email: "thandi@example.com".into(),
        phone: "082 555 1234".into(),
        receipt_number: "R-889".into(),
        basket_amount: amount.into(),
        cashier_pin: "4321".into(),
        popia_consent: true,
        marketing_consent: true,
    }
}

pub fn session() -> SessionContext {
    SessionContext {
        store_id: "CL-001".into(),
        store_secret: "HV-SECRET-2025".into(),
        device_id: "TAB-A9-HIGHVELD-01".into(),
    }
}

pub fn config_reply(qualify: f64) -> Value {
    json!({
        "ok": true,
        "store": { "name": "Highveld", "qualifyAmount": qualify },
        "prizes": [
            { "name": "Free Wings", "imageUrl": "https://cdn.example.com/wings.png" },
            { "name": "Chips" },
            { "name": "Grand Draw" }
        ]
    })
}

pub fn store_config(qualify: f64) -> StoreConfig {
    StoreConfig::from_value(config_reply(qualify)).unwrap()
}

pub fn kiosk_config() -> KioskConfig {
    KioskConfig::from_json(
        &json!({
            "apiUrl": API_URL,
            "endpointSuffix": "/exec",
            "storeSecrets": { "CL-001": "HV-SECRET-2025" }
        })
        .to_string(),
    )
    .unwrap()
}

pub fn endpoint() -> Endpoint {
    Endpoint::parse(API_URL, Some("/exec")).unwrap()
}

pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// How the fake server answers each dispatched call.
#[derive(Clone)]
pub enum Reply {
    Respond(Value),
    Fail(Failure),
    /// Keep the call open; the test resolves it through `held()`.
    Hold,
}

pub struct FakeExchange {
    delivery: Delivery,
    reply: RefCell<Reply>,
    urls: RefCell<Vec<Url>>,
    dispatched: RefCell<Vec<CallId>>,
    released: RefCell<Vec<CallId>>,
    held: RefCell<Vec<PendingCall>>,
}

impl FakeExchange {
    pub fn new(delivery: Delivery, reply: Reply) -> Rc<Self> {
        Rc::new(Self {
            delivery,
            reply: RefCell::new(reply),
            urls: RefCell::new(Vec::new()),
            dispatched: RefCell::new(Vec::new()),
            released: RefCell::new(Vec::new()),
            held: RefCell::new(Vec::new()),
        })
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.borrow_mut() = reply;
    }

    pub fn urls(&self) -> Vec<Url> {
        self.urls.borrow().clone()
    }

    pub fn dispatched_ids(&self) -> Vec<CallId> {
        self.dispatched.borrow().clone()
    }

    pub fn released(&self) -> Vec<CallId> {
        self.released.borrow().clone()
    }

    pub fn held(&self) -> Vec<PendingCall> {
        self.held.borrow().clone()
    }
}

impl Exchange for FakeExchange {
    fn delivery(&self) -> Delivery {
        self.delivery
    }

    fn dispatch(&self, url: Url, call: PendingCall) {
        self.urls.borrow_mut().push(url);
        self.dispatched.borrow_mut().push(call.id().clone());
        let reply = self.reply.borrow().clone();
        match reply {
            Reply::Respond(value) => {
                call.resolve(Ok(value));
            }
            Reply::Fail(failure) => {
                call.resolve(Err(failure));
            }
            Reply::Hold => self.held.borrow_mut().push(call),
        }
    }

    fn release(&self, id: &CallId) {
        self.released.borrow_mut().push(id.clone());
    }
}

/// Records everything the orchestrator does to the screen.
pub struct RecordingSurface {
    form: RefCell<SpinFormData>,
    enabled: RefCell<Vec<bool>>,
    eligibility: RefCell<Vec<Eligibility>>,
    rotations: RefCell<Vec<f64>>,
    presented: RefCell<Vec<(Instant, Presentation)>>,
    online: RefCell<Vec<bool>>,
}

impl RecordingSurface {
    pub fn new(form: SpinFormData) -> Rc<Self> {
        Rc::new(Self {
            form: RefCell::new(form),
            enabled: RefCell::new(Vec::new()),
            eligibility: RefCell::new(Vec::new()),
            rotations: RefCell::new(Vec::new()),
            presented: RefCell::new(Vec::new()),
            online: RefCell::new(Vec::new()),
        })
    }

    pub fn edit(&self, change: impl FnOnce(&mut SpinFormData)) {
        change(&mut self.form.borrow_mut());
    }

    pub fn enabled_history(&self) -> Vec<bool> {
        self.enabled.borrow().clone()
    }

    pub fn last_enabled(&self) -> Option<bool> {
        self.enabled.borrow().last().copied()
    }

    pub fn last_eligibility(&self) -> Option<Eligibility> {
        self.eligibility.borrow().last().cloned()
    }

    pub fn rotations(&self) -> Vec<f64> {
        self.rotations.borrow().clone()
    }

    pub fn presented(&self) -> Vec<Presentation> {
        self.presented.borrow().iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn presented_at(&self) -> Vec<Instant> {
        self.presented.borrow().iter().map(|(at, _)| *at).collect()
    }

    pub fn online_history(&self) -> Vec<bool> {
        self.online.borrow().clone()
    }
}

impl KioskSurface for RecordingSurface {
    fn read_form(&self) -> SpinFormData {
        self.form.borrow().clone()
    }

    fn set_spin_enabled(&self, enabled: bool) {
        self.enabled.borrow_mut().push(enabled);
    }

    fn show_eligibility(&self, eligibility: &Eligibility) {
        self.eligibility.borrow_mut().push(eligibility.clone());
    }

    fn rotate_wheel(&self, degrees: f64) {
        self.rotations.borrow_mut().push(degrees);
    }

    fn present(&self, presentation: &Presentation) {
        self.presented.borrow_mut().push((Instant::now(), presentation.clone()));
    }

    fn set_online(&self, online: bool) {
        self.online.borrow_mut().push(online);
    }
}

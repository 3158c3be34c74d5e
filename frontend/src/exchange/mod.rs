mod direct;
mod script;

pub use direct::DirectExchange;
pub use script::ScriptExchange;

use kiosk_shared::{CallId, Delivery, Endpoint, Exchange, ExchangeMode, PendingCall};
use url::Url;

/// The browser exchange picked for this page at startup.
pub enum KioskExchange {
    Direct(DirectExchange),
    Script(ScriptExchange),
}

impl KioskExchange {
    pub fn for_endpoint(mode: ExchangeMode, endpoint: &Endpoint, page_origin: Option<&str>) -> Self {
        let delivery = mode.resolve(endpoint, page_origin);
        log::info!("Using {:?} exchange for {}", delivery, endpoint.origin());
        match delivery {
            Delivery::Direct => KioskExchange::Direct(DirectExchange),
            Delivery::Callback => KioskExchange::Script(ScriptExchange::default()),
        }
    }
}

impl Exchange for KioskExchange {
    fn delivery(&self) -> Delivery {
        match self {
            KioskExchange::Direct(_) => Delivery::Direct,
            KioskExchange::Script(_) => Delivery::Callback,
        }
    }

    fn dispatch(&self, url: Url, call: PendingCall) {
        match self {
            KioskExchange::Direct(direct) => direct.dispatch(url, call),
            KioskExchange::Script(script) => script.dispatch(url, call),
        }
    }

    fn release(&self, id: &CallId) {
        if let KioskExchange::Script(script) = self {
            script.release(id);
        }
    }
}

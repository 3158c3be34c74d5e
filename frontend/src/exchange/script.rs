use std::cell::RefCell;
use std::collections::HashMap;

use kiosk_shared::{CallId, CallResult, Failure, PendingCall};
use serde_json::Value;
use url::Url;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlScriptElement};

/// A `<script>` tag plus the global callback it will invoke.
struct Injected {
    script: HtmlScriptElement,
    _on_data: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

/// Cross-origin exchange: the endpoint answers with a script that calls
/// `window[callback](payload)`.
#[derive(Default)]
pub struct ScriptExchange {
    live: RefCell<HashMap<CallId, Injected>>,
}

impl ScriptExchange {
    pub fn dispatch(&self, url: Url, call: PendingCall) {
        match inject(&url, &call) {
            Ok(injected) => {
                self.live.borrow_mut().insert(call.id().clone(), injected);
            }
            Err(reason) => {
                log::warn!("Could not inject API script: {}", reason);
                call.resolve(Err(Failure::network(reason)));
            }
        }
    }

    pub fn release(&self, id: &CallId) {
        if let Some(injected) = self.live.borrow_mut().remove(id) {
            // Detach before the closure drops; a late `error` event must find no handler
            injected.script.set_onerror(None);
            injected.script.remove();
        }
        let window = gloo_utils::window();
        let _ = js_sys::Reflect::delete_property(window.unchecked_ref::<js_sys::Object>(), &JsValue::from_str(id.as_str()));
        log::debug!("Released callback {}", id);
    }
}

fn inject(url: &Url, call: &PendingCall) -> Result<Injected, String> {
    let window = gloo_utils::window();
    let document = gloo_utils::document();

    let script: HtmlScriptElement = document
        .create_element("script")
        .map_err(describe)?
        .dyn_into()
        .map_err(|_| "created element is not a script".to_string())?;

    let data_call = call.clone();
    let on_data = Closure::wrap(Box::new(move |payload: JsValue| {
        data_call.resolve(decode_payload(&payload));
    }) as Box<dyn FnMut(JsValue)>);
    js_sys::Reflect::set(&window, &JsValue::from_str(call.id().as_str()), on_data.as_ref()).map_err(describe)?;

    let error_call = call.clone();
    let on_error = Closure::wrap(Box::new(move |_: Event| {
        error_call.resolve(Err(Failure::network("Could not load API script")));
    }) as Box<dyn FnMut(Event)>);
    script.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    script.set_async(true);
    script.set_src(url.as_str());

    document
        .head()
        .ok_or_else(|| "document has no head".to_string())?
        .append_child(&script)
        .map_err(describe)?;

    Ok(Injected { script, _on_data: on_data, _on_error: on_error })
}

fn decode_payload(payload: &JsValue) -> CallResult {
    let text = js_sys::JSON::stringify(payload)
        .ok()
        .and_then(|text| text.as_string())
        .ok_or_else(|| Failure::bad_response("Callback payload is not serialisable"))?;
    serde_json::from_str::<Value>(&text).map_err(|e| Failure::bad_response(e.to_string()))
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

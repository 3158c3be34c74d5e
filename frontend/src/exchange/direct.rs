use gloo_net::http::Request;
use kiosk_shared::{CallResult, Failure, PendingCall};
use serde_json::Value;
use url::Url;
use wasm_bindgen_futures::spawn_local;

/// Plain GET whose body is the JSON envelope. Only usable when the endpoint
/// shares the page's origin.
#[derive(Default)]
pub struct DirectExchange;

impl DirectExchange {
    pub fn dispatch(&self, url: Url, call: PendingCall) {
        spawn_local(async move {
            call.resolve(fetch(&url).await);
        });
    }
}

async fn fetch(url: &Url) -> CallResult {
    let response = Request::get(url.as_str())
        .send()
        .await
        .map_err(|e| Failure::network(format!("Could not reach API: {}", e)))?;

    if !response.ok() {
        return Err(Failure::network(format!("API answered with status {}", response.status())));
    }
    let body = response
        .text()
        .await
        .map_err(|e| Failure::network(format!("Could not read API response: {}", e)))?;
    parse_body(&body)
}

/// The endpoint answered, so an unreadable body is a bad response, not an outage.
fn parse_body(body: &str) -> CallResult {
    serde_json::from_str::<Value>(body).map_err(|e| Failure::bad_response(format!("API response was not JSON: {}", e)))
}

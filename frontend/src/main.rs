use kiosk_frontend::{config, App};
use yew::Renderer;

fn main() {
    let kiosk = config::load_kiosk_config();
    wasm_logger::init(wasm_logger::Config::new(config::log_level(kiosk.as_ref())));

    Renderer::<App>::new().render();
}

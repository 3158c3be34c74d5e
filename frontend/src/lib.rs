pub mod components;
pub mod config;
pub mod exchange;
pub mod pages;
pub mod storage;
pub mod styles;
pub mod surface;
pub mod timer;

use yew::prelude::*;
use crate::pages::kiosk::KioskPage;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen w-full">
            <KioskPage />
        </div>
    }
}

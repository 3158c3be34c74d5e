use kiosk_shared::{Presentation, Tone};
use yew::prelude::*;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub presentation: Presentation,
    /// Setup failures are blocking and render without a close button.
    #[prop_or_default]
    pub on_close: Option<Callback<MouseEvent>>,
}

#[function_component(ResultModal)]
pub fn result_modal(props: &Props) -> Html {
    let title_class = match props.presentation.tone {
        Tone::Celebrate => styles::MODAL_TITLE_CELEBRATE,
        Tone::Neutral => styles::MODAL_TITLE_NEUTRAL,
        Tone::Problem => styles::MODAL_TITLE_PROBLEM,
    };

    html! {
        <div class={styles::MODAL_BACKDROP} role="dialog" aria-modal="true">
            <div class={styles::MODAL_CARD}>
                <h2 class={title_class}>{&props.presentation.title}</h2>
                <div class={styles::MODAL_BODY}>
                    { for props.presentation.body.split('\n').map(|line| {
                        if line.is_empty() {
                            html! { <br /> }
                        } else {
                            html! { <p>{line}</p> }
                        }
                    }) }
                </div>
                if let Some(on_close) = &props.on_close {
                    <button class={styles::MODAL_BUTTON} onclick={on_close.clone()}>
                        {"Close"}
                    </button>
                }
            </div>
        </div>
    }
}

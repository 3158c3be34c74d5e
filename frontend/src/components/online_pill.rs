use yew::prelude::*;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub online: bool,
}

#[function_component(OnlinePill)]
pub fn online_pill(props: &Props) -> Html {
    let (pill, dot, label) = if props.online {
        (styles::PILL_ONLINE, styles::PILL_DOT_ONLINE, "Online")
    } else {
        (styles::PILL_OFFLINE, styles::PILL_DOT_OFFLINE, "Offline")
    };

    html! {
        <span class={pill}>
            <span class={dot}></span>
            {label}
        </span>
    }
}

mod spin_form;
mod wheel_svg;

use std::time::Duration;

use kiosk_shared::shared_spin_wheel::{demo_wedges, format_amount};
use kiosk_shared::{
    bootstrap, evaluate, present_setup_failure, BootError, Eligibility, GateReason, Presentation, SpinFormData,
    SpinOrchestrator, SpinSettings, StoreConfig, Transport,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

use crate::components::{OnlinePill, ResultModal};
use crate::config::{launch_params, load_kiosk_config, page_origin};
use crate::exchange::KioskExchange;
use crate::storage::device_store;
use crate::styles;
use crate::surface::{KioskOrchestrator, YewSurface};
use crate::timer::GlooTimer;
use spin_form::SpinForm;
use wheel_svg::WheelSvg;

#[function_component(KioskPage)]
pub fn kiosk_page() -> Html {
    // Spin button pulse animation
    {
        use_effect_with((), move |_| {
            let style = window().and_then(|w| w.document()).and_then(|document| {
                let head = document.head()?;
                let style = document.create_element("style").ok()?;
                style.set_text_content(Some(styles::CUSTOM_CSS));
                head.append_child(&style).ok()?;
                Some(style)
            });
            move || {
                if let Some(style) = style {
                    style.remove();
                }
            }
        });
    }

    let form = use_state(SpinFormData::default);
    let latest_form = use_mut_ref(SpinFormData::default);
    let spin_enabled = use_state(|| false);
    let eligibility = use_state(Eligibility::loading);
    let rotation = use_state(|| 0.0_f64);
    let presentation = use_state(|| None::<Presentation>);
    let online = use_state(|| false);
    let setup_error = use_state(|| None::<Presentation>);
    let store = use_state(|| None::<StoreConfig>);
    let device = use_state(String::new);
    let settings = use_state(SpinSettings::default);
    let orchestrator = use_state(|| None::<KioskOrchestrator>);

    // Bootstrap once on mount
    {
        let surface = YewSurface {
            form: latest_form.clone(),
            spin_enabled: spin_enabled.clone(),
            eligibility: eligibility.clone(),
            rotation: rotation.clone(),
            presentation: presentation.clone(),
            online: online.clone(),
        };
        let setup_error = setup_error.clone();
        let store = store.clone();
        let device = device.clone();
        let settings = settings.clone();
        let orchestrator = orchestrator.clone();

        use_effect_with((), move |_| {
            match load_kiosk_config() {
                Ok(config) => {
                    settings.set(config.spin_settings());
                    spawn_local(async move {
                        let launch = launch_params();
                        let devices = device_store();
                        let origin = page_origin();
                        let booted = bootstrap(&launch, &config, &*devices, |endpoint| {
                            let exchange = KioskExchange::for_endpoint(config.exchange, &endpoint, origin.as_deref());
                            Transport::new(endpoint, exchange, GlooTimer)
                        })
                        .await;

                        match booted {
                            Ok(booted) => {
                                store.set(Some(booted.store.clone()));
                                device.set(booted.session.device_id.clone());
                                let ready = SpinOrchestrator::new(booted, surface, config.spin_settings());
                                ready.start();
                                orchestrator.set(Some(ready));
                            }
                            Err(err) => {
                                log::warn!("Kiosk setup failed: {}", err);
                                if let BootError::Rejected(failure) = &err {
                                    if failure.kind.is_transport() {
                                        surface.online.set(false);
                                    }
                                }
                                setup_error.set(Some(present_setup_failure(&err)));
                            }
                        }
                    });
                }
                Err(err) => {
                    log::warn!("Kiosk configuration unreadable: {}", err);
                    setup_error.set(Some(present_setup_failure(&BootError::Config(err))));
                }
            }
            || ()
        });
    }

    let on_change = {
        let form = form.clone();
        let latest_form = latest_form.clone();
        let eligibility = eligibility.clone();
        let orchestrator = orchestrator.clone();
        Callback::from(move |next: SpinFormData| {
            *latest_form.borrow_mut() = next.clone();
            match &*orchestrator {
                Some(orchestrator) => {
                    orchestrator.refresh();
                }
                None => eligibility.set(evaluate(&next, None)),
            }
            form.set(next);
        })
    };

    let on_spin = {
        let orchestrator = orchestrator.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(orchestrator) = &*orchestrator else {
                return;
            };
            if let Some(spin) = orchestrator.request_spin() {
                spawn_local(async move {
                    spin.await;
                });
            }
        })
    };

    let on_close = {
        let presentation = presentation.clone();
        Callback::from(move |_: MouseEvent| presentation.set(None))
    };

    let wedges = (*store).as_ref().map(StoreConfig::wedges).unwrap_or_else(demo_wedges);
    let status_class = if eligibility.eligible { styles::STATUS_READY } else { styles::STATUS_BLOCKED };
    let store_line = (*store)
        .as_ref()
        .map(|s| format!("{} · Spend {}+ to spin", s.store.name, format_amount(&settings.currency, s.qualify_amount())))
        .unwrap_or_default();
    let spin_ms = duration_ms(settings.spin_floor);

    html! {
        <div class={styles::CONTAINER}>
            <header class={styles::HEADER}>
                <div>
                    <h1 class={styles::HEADER_TITLE}>{"Spin to Win"}</h1>
                    <p class={styles::HEADER_STORE}>{store_line}</p>
                    if !device.is_empty() {
                        <p class={styles::HEADER_DEVICE}>{format!("Device {}", *device)}</p>
                    }
                </div>
                <OnlinePill online={*online} />
            </header>

            <main class={styles::LAYOUT}>
                <section class={styles::CARD}>
                    <SpinForm
                        form={(*form).clone()}
                        hint={eligibility.reason.field_hint()}
                        on_change={on_change}
                    />
                    <p class={classes!("mt-6", status_class)}>
                        {eligibility.reason.status_message(&settings.currency)}
                    </p>
                </section>

                <section class={styles::CARD}>
                    <WheelSvg
                        wedges={wedges}
                        rotation={*rotation}
                        spin_ms={spin_ms}
                        caption={eligibility.reason.wheel_caption()}
                    />
                    <button
                        class={if *spin_enabled { styles::SPIN_BUTTON } else { styles::SPIN_BUTTON_DISABLED }}
                        disabled={!*spin_enabled}
                        onclick={on_spin}
                    >
                        if eligibility.reason == GateReason::Loading {
                            <svg class={styles::LOADING_SPINNER} xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                                <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                                <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
                            </svg>
                        } else {
                            {"SPIN"}
                        }
                    </button>
                </section>
            </main>

            {
                match ((*setup_error).clone(), (*presentation).clone()) {
                    (Some(blocking), _) => html! { <ResultModal presentation={blocking} /> },
                    (None, Some(result)) => html! { <ResultModal presentation={result} on_close={on_close} /> },
                    (None, None) => html! {},
                }
            }
        </div>
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

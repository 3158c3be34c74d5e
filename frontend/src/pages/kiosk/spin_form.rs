use kiosk_shared::eligibility::FormField;
use kiosk_shared::validation::sanitize_phone;
use kiosk_shared::SpinFormData;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub form: SpinFormData,
    pub hint: Option<(FormField, &'static str)>,
    pub on_change: Callback<SpinFormData>,
}

fn text_field(
    props: &Props,
    label: &'static str,
    input_type: &'static str,
    value: &str,
    field: Option<FormField>,
    apply: fn(&mut SpinFormData, String),
) -> Html {
    let oninput = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = form.clone();
            apply(&mut next, input.value());
            on_change.emit(next);
        })
    };
    let hint = props
        .hint
        .filter(|(hinted, _)| field == Some(*hinted))
        .map(|(_, message)| message);

    html! {
        <div>
            <label class={styles::TEXT_LABEL}>{label}</label>
            <input
                type={input_type}
                class={if hint.is_some() { styles::INPUT_ERROR } else { styles::INPUT }}
                value={value.to_string()}
                {oninput}
            />
            if let Some(message) = hint {
                <p class={styles::TEXT_ERROR}>{message}</p>
            }
        </div>
    }
}

fn consent_box(props: &Props, label: &'static str, checked: bool, apply: fn(&mut SpinFormData, bool)) -> Html {
    let onchange = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = form.clone();
            apply(&mut next, input.checked());
            on_change.emit(next);
        })
    };

    html! {
        <label class={styles::CHECKBOX_ROW}>
            <input type="checkbox" class={styles::CHECKBOX} {checked} {onchange} />
            <span>{label}</span>
        </label>
    }
}

#[function_component(SpinForm)]
pub fn spin_form(props: &Props) -> Html {
    let form = &props.form;

    html! {
        <div class={styles::FORM}>
            <div class={styles::FORM_ROW}>
                { text_field(props, "Name", "text", &form.name, None, |f, v| f.name = v) }
                { text_field(props, "Surname", "text", &form.surname, None, |f, v| f.surname = v) }
            </div>
            { text_field(props, "Email", "email", &form.email, Some(FormField::Email), |f, v| f.email = v) }
            // Only digits are kept as the customer types.
            { text_field(props, "Phone", "tel", &form.phone, Some(FormField::Phone), |f, v| f.phone = sanitize_phone(&v)) }
            <div class={styles::FORM_ROW}>
                { text_field(props, "Receipt number", "text", &form.receipt_number, None, |f, v| f.receipt_number = v) }
                { text_field(props, "Basket amount", "number", &form.basket_amount, None, |f, v| f.basket_amount = v) }
            </div>
            { text_field(props, "Cashier PIN", "password", &form.cashier_pin, None, |f, v| f.cashier_pin = v) }
            { consent_box(props, "I agree to the processing of my personal information (POPIA).", form.popia_consent, |f, v| f.popia_consent = v) }
            { consent_box(props, "I agree to receive marketing messages.", form.marketing_consent, |f, v| f.marketing_consent = v) }
        </div>
    }
}

use chrono::{Local, NaiveDateTime};
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::booking::controller::{SubmissionController, SubmissionState, SubmitContext, SubmitOutcome};
use crate::booking::dispatch::{
    cancel_fallback, schedule_fallback, BrowserNavigator, FallbackSlot, GlooTimer, Navigator,
};
use crate::booking::message::MessageLabels;
use crate::booking::validation::{Field, PHONE_DIGITS};
use crate::components::toast::use_toaster;
use crate::config;
use crate::error::DispatchError;
use crate::i18n::{Language, Translations, Translator};
use crate::notify::{NoticeKind, Notifier};
use crate::preferences::use_language;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

struct FieldInput {
    field: Field,
    input_type: &'static str,
    label_key: &'static str,
    placeholder_key: Option<&'static str>,
}

const FIELDS: [FieldInput; 5] = [
    FieldInput { field: Field::Name, input_type: "text", label_key: "form.name", placeholder_key: Some("form.name_placeholder") },
    FieldInput { field: Field::Phone, input_type: "text", label_key: "form.phone", placeholder_key: Some("form.phone_placeholder") },
    FieldInput { field: Field::Email, input_type: "email", label_key: "form.email", placeholder_key: Some("form.email_placeholder") },
    FieldInput { field: Field::Date, input_type: "date", label_key: "form.date", placeholder_key: None },
    FieldInput { field: Field::Time, input_type: "time", label_key: "form.time", placeholder_key: None },
];

#[function_component(Reserve)]
pub fn reserve() -> Html {
    let language = use_language();
    let t = language.translations();
    let toaster = use_toaster();
    let controller = use_memo(|_| SubmissionController::new(), ());
    let fallback: FallbackSlot<Timeout> = (*use_memo(|_| FallbackSlot::default(), ())).clone();
    let refresh = use_force_update();

    // Date rules depend on the clock, so re-validate even without input
    {
        let refresh = refresh.clone();
        use_interval(move || refresh.force_update(), config::VALIDATION_TICK_MS);
    }

    // Cancel a pending WhatsApp fallback when the form goes away
    {
        let fallback = fallback.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    if cancel_fallback(&fallback) {
                        log::debug!("Cancelled pending WhatsApp fallback");
                    }
                }
            },
            (),
        );
    }

    let onsubmit = {
        let controller = controller.clone();
        let toaster = toaster.clone();
        let fallback = fallback.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let navigator: Rc<dyn Navigator> = match BrowserNavigator::new() {
                Ok(navigator) => Rc::new(navigator),
                Err(err) => {
                    log::error!("Cannot submit booking: {}", err);
                    toaster.notify(NoticeKind::Error, &t.t("notify.error"));
                    return;
                }
            };
            // The clinic reads bookings in English whatever the page language
            let labels = MessageLabels::resolve(&Translations::new(Language::English));
            let snapshot = controller.values();
            let outcome = controller.submit(&SubmitContext {
                now: now(),
                number: config::BOOKING_WHATSAPP_NUMBER,
                labels: &labels,
                translator: &t,
                navigator: navigator.as_ref(),
                notifier: &toaster,
            });
            match outcome {
                SubmitOutcome::Sent(chain) => {
                    let controller = controller.clone();
                    let toaster = toaster.clone();
                    let refresh = refresh.clone();
                    let on_exhausted: Rc<dyn Fn(DispatchError)> = Rc::new(move |err: DispatchError| {
                        log::error!("WhatsApp fallback exhausted: {}", err);
                        // The form was cleared on hand-off; give the details back
                        controller.restore(snapshot.clone());
                        toaster.notify(NoticeKind::Error, &t.t("notify.error"));
                        toaster.notify(NoticeKind::Info, &t.t("notify.restored"));
                        refresh.force_update();
                    });
                    schedule_fallback(Rc::new(GlooTimer), fallback.clone(), chain, navigator, on_exhausted);
                }
                SubmitOutcome::Invalid(result) => {
                    log::debug!("Booking form has {} invalid field(s)", result.errors().count());
                }
                SubmitOutcome::Failed(err) => {
                    log::warn!("Booking not sent, form kept for retry: {}", err);
                }
                SubmitOutcome::Ignored => {}
            }
            refresh.force_update();
        })
    };

    let values = controller.values();
    let validation = controller.validate(now());
    let can_submit = controller.can_submit(now());

    html! {
        <div class="section reserve">
            <style>
                {r#"
                    .reserve-form {
                        display: flex;
                        flex-direction: column;
                        gap: 1.5rem;
                        max-width: 560px;
                        margin: 3rem auto 0;
                        padding: 0 1rem;
                    }
                    .form-field {
                        display: flex;
                        flex-direction: column;
                        gap: 0.25rem;
                        position: relative;
                    }
                    .form-field input {
                        width: 100%;
                        padding: 0.5rem;
                        border: 1px solid #cbd5e1;
                        border-radius: 4px;
                    }
                    .form-field input.invalid {
                        border-color: #ef4444;
                    }
                    .field-error {
                        color: #ef4444;
                        font-size: 0.75rem;
                        padding-inline-start: 0.5rem;
                    }
                    .reserve-form button:disabled {
                        cursor: not-allowed;
                        opacity: 0.6;
                    }
                "#}
            </style>
            <h2 class="section-title">{ t.t("form.title") }</h2>
            <form class="reserve-form" {onsubmit} novalidate=true>
                { for FIELDS.iter().map(|entry| {
                    let field = entry.field;
                    let oninput = {
                        let controller = controller.clone();
                        let refresh = refresh.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let kept = controller.update(field, &input.value());
                            // The phone filter may drop characters the browser already shows
                            if kept != input.value() {
                                input.set_value(&kept);
                            }
                            refresh.force_update();
                        })
                    };
                    let onblur = {
                        let controller = controller.clone();
                        let refresh = refresh.clone();
                        Callback::from(move |_: FocusEvent| {
                            controller.touch(field);
                            refresh.force_update();
                        })
                    };
                    let error = if controller.is_touched(field) {
                        validation.message(field, &t)
                    } else {
                        None
                    };
                    let id = format!("booking-{}", field.key());
                    html! {
                        <div class="form-field" key={field.key()}>
                            <label class="description" for={id.clone()}>{ t.t(entry.label_key) }</label>
                            <input
                                {id}
                                name={field.key()}
                                type={entry.input_type}
                                class={classes!(error.is_some().then(|| "invalid"))}
                                value={values.get(field).to_string()}
                                placeholder={entry.placeholder_key.map(|key| t.t(key))}
                                inputmode={(field == Field::Phone).then(|| "numeric")}
                                maxlength={(field == Field::Phone).then(|| PHONE_DIGITS.to_string())}
                                {oninput}
                                {onblur}
                            />
                            {
                                match error {
                                    Some(message) => html! { <div class="field-error">{ message }</div> },
                                    None => html! {},
                                }
                            }
                        </div>
                    }
                }) }
                <button type="submit" class="primary-button" disabled={!can_submit}>
                    {
                        if controller.state() == SubmissionState::Submitting {
                            t.t("form.sending")
                        } else {
                            t.t("form.confirm")
                        }
                    }
                </button>
            </form>
        </div>
    }
}

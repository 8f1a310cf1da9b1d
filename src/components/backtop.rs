use web_sys::{ScrollBehavior, ScrollToOptions};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::booking::dispatch::normalize_number;
use crate::config;
use crate::i18n::Translator;
use crate::preferences::use_language;

fn scroll_to_top() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Language toggle, back-to-top and the call/WhatsApp menu pinned to the
/// bottom corners of the page.
#[function_component(FloatingControls)]
pub fn floating_controls() -> Html {
    let language = use_language();
    let t = language.translations();
    let menu_open = use_state(|| false);
    let (_, scroll_y) = use_window_scroll();
    let (width, _) = use_window_size();
    let is_mobile = width < config::MOBILE_BREAKPOINT;

    let toggle_language = {
        let language = language.clone();
        Callback::from(move |_: MouseEvent| {
            language.change.emit(language.language.other());
        })
    };

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    // On small screens the menu covers the page, so close it once used
    let after_contact = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            if is_mobile {
                menu_open.set(false);
            }
        })
    };

    let chat_link = format!("https://wa.me/{}", normalize_number(config::CHAT_WHATSAPP_NUMBER));
    let call_link = format!("tel:{}", config::CLINIC_PHONE);

    html! {
        <>
            <style>
                {r#"
                    .floating-controls {
                        position: fixed;
                        bottom: 1.5rem;
                        inset-inline-start: 1.5rem;
                        z-index: 50;
                        display: flex;
                        flex-direction: column;
                        align-items: flex-start;
                        gap: 0.75rem;
                    }
                    .language-toggle {
                        position: fixed;
                        bottom: 1.5rem;
                        inset-inline-end: 1.5rem;
                        z-index: 50;
                    }
                    .round-button {
                        width: 3rem;
                        height: 3rem;
                        border-radius: 50%;
                        border: none;
                        background: #0891b2;
                        color: #fff;
                        font-size: 1.1rem;
                        cursor: pointer;
                        box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
                    }
                    .contact-options {
                        display: flex;
                        flex-direction: column;
                        gap: 0.5rem;
                    }
                    .contact-option {
                        display: block;
                        padding: 0.5rem 1rem;
                        border-radius: 999px;
                        background: #fff;
                        color: #0891b2;
                        text-decoration: none;
                        box-shadow: 0 2px 8px rgba(0, 0, 0, 0.15);
                    }
                    .contact-overlay {
                        position: fixed;
                        inset: 0;
                        z-index: 40;
                        background: rgba(0, 0, 0, 0.2);
                    }
                "#}
            </style>
            <button
                class="round-button language-toggle"
                title={t.t("controls.switch_language")}
                onclick={toggle_language}
            >
                { language.language.other().code().to_uppercase() }
            </button>
            {
                if *menu_open {
                    html! { <div class="contact-overlay" onclick={close_menu}></div> }
                } else {
                    html! {}
                }
            }
            <div class="floating-controls">
                {
                    if *menu_open {
                        html! {
                            <div class="contact-options">
                                <a class="contact-option" href={call_link} onclick={after_contact.clone()}>
                                    { t.t("controls.call") }
                                </a>
                                <a
                                    class="contact-option"
                                    href={chat_link}
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    onclick={after_contact}
                                >
                                    { t.t("controls.whatsapp") }
                                </a>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                <button
                    class="round-button"
                    title={if *menu_open { t.t("controls.close_contact") } else { t.t("controls.open_contact") }}
                    onclick={toggle_menu}
                >
                    { if *menu_open { "✕" } else { "☎" } }
                </button>
                {
                    if scroll_y > config::BACK_TO_TOP_OFFSET {
                        html! {
                            <button
                                class="round-button"
                                title={t.t("controls.back_to_top")}
                                onclick={Callback::from(|_: MouseEvent| scroll_to_top())}
                            >
                                { "↑" }
                            </button>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </>
    }
}

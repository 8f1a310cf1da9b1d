use web_sys::{ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::backtop::FloatingControls;
use crate::components::hero::Hero;
use crate::components::location::Location;
use crate::components::reserve::Reserve;
use crate::components::sections::{About, Doctors, Services};
use crate::i18n::Translator;
use crate::preferences::use_language;
use crate::Route;

const RESERVE_SECTION_ID: &str = "reserve-section";

fn scroll_to_reserve() {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(RESERVE_SECTION_ID))
    else {
        log::warn!("Booking section #{} not found", RESERVE_SECTION_ID);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[function_component(Home)]
pub fn home() -> Html {
    let on_book = Callback::from(|_: ()| scroll_to_reserve());

    html! {
        <div class="page">
            <Hero {on_book} />
            <About />
            <Services />
            <Doctors />
            <Location />
            <div id={RESERVE_SECTION_ID}>
                <Reserve />
            </div>
            <FloatingControls />
        </div>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    let t = use_language().translations();
    html! {
        <div class="section not-found">
            <h1 class="section-title">{ t.t("notfound.title") }</h1>
            <p class="description">
                <Link<Route> to={Route::Home}>{ t.t("notfound.back") }</Link<Route>>
            </p>
        </div>
    }
}

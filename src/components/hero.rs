use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;
use crate::i18n::Translator;
use crate::preferences::use_language;

const TAGLINE_KEYS: [&str; 5] = [
    "hero.slider1",
    "hero.slider2",
    "hero.slider3",
    "hero.slider4",
    "hero.slider5",
];

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub on_book: Callback<()>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let t = use_language().translations();
    let current = use_state(|| 0usize);
    let visible = use_state(|| true);

    {
        let current = current.clone();
        let visible = visible.clone();
        use_interval(
            move || {
                visible.set(false);
                let current = current.clone();
                let visible = visible.clone();
                // Swap the text while it is faded out
                let timeout = Timeout::new(config::HERO_FADE_MS, move || {
                    current.set((*current + 1) % TAGLINE_KEYS.len());
                    visible.set(true);
                });
                timeout.forget();
            },
            config::HERO_ROTATE_MS,
        );
    }

    let onclick = {
        let on_book = props.on_book.clone();
        Callback::from(move |_: MouseEvent| on_book.emit(()))
    };

    html! {
        <header class="hero">
            <style>
                {r#"
                    .hero {
                        position: relative;
                        background: #0891b2;
                        padding: 4rem 1rem 5rem;
                        text-align: center;
                        color: #fff;
                    }
                    .hero h1 {
                        font-size: clamp(1.5rem, 4vw, 2.5rem);
                        margin-bottom: 1rem;
                    }
                    .hero-tagline-box {
                        min-height: 72px;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        margin-bottom: 1.5rem;
                    }
                    .hero-tagline {
                        transition: opacity 0.4s ease-in-out, transform 0.4s ease-in-out;
                        opacity: 1;
                        transform: translateX(4px);
                    }
                    .hero-tagline.hidden {
                        opacity: 0;
                        transform: translateX(-4px);
                    }
                    .hero-wave {
                        position: absolute;
                        inset-inline: 0;
                        bottom: -1px;
                        width: 100%;
                        height: 24px;
                    }
                "#}
            </style>
            <h1>{ t.t("hero.title") }</h1>
            <div class="hero-tagline-box">
                <p class={classes!("hero-tagline", (!*visible).then(|| "hidden"))}>
                    { t.t(TAGLINE_KEYS[*current % TAGLINE_KEYS.len()]) }
                </p>
            </div>
            <button class="primary-button" {onclick}>{ t.t("hero.booknow") }</button>
            <svg class="hero-wave" viewBox="0 0 224 12" preserveAspectRatio="none" aria-hidden="true">
                <path fill="#006064" d="M0,0 C48.89,6.27 86.22,9.41 112,9.41 C137.78,9.41 175.11,6.27 224,0 L224,12.04 L0,12.04 Z" />
            </svg>
        </header>
    }
}

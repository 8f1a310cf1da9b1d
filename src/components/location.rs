use rand::Rng;
use yew::prelude::*;

use crate::components::shapes::{generate_shapes, DecorativeShape, ShapeKind, ShapeOptions};
use crate::config;
use crate::i18n::Translator;
use crate::preferences::use_language;

#[function_component(Location)]
pub fn location() -> Html {
    let t = use_language().translations();

    // Generated once per mount
    let shapes = use_memo(
        |_| {
            let mut rng = rand::thread_rng();
            let section_count = rng.gen_range(8..=15);
            let section = generate_shapes(
                &mut rng,
                section_count,
                &ShapeOptions {
                    min_size: 30,
                    max_size: 100,
                    min_opacity: 0.04,
                    max_opacity: 0.18,
                    kinds: vec![ShapeKind::Circle, ShapeKind::Square, ShapeKind::Diamond, ShapeKind::Line],
                    slanted_ratio: 0.5,
                    ..ShapeOptions::default()
                },
            );
            let frame_count = rng.gen_range(4..=8);
            let frame = generate_shapes(
                &mut rng,
                frame_count,
                &ShapeOptions {
                    min_size: 15,
                    max_size: 40,
                    min_opacity: 0.08,
                    max_opacity: 0.25,
                    kinds: vec![ShapeKind::Line, ShapeKind::Circle],
                    slanted_ratio: 0.7,
                    ..ShapeOptions::default()
                },
            );
            (section, frame)
        },
        (),
    );
    let (section_shapes, frame_shapes) = &*shapes;

    let details = [
        ("map.address", t.t("map.addressval"), None),
        ("map.hours", t.t("map.hoursval"), None),
        ("map.email", config::CLINIC_EMAIL.to_string(), Some(format!("mailto:{}", config::CLINIC_EMAIL))),
        ("map.phone", config::CLINIC_PHONE.to_string(), Some(format!("tel:{}", config::CLINIC_PHONE))),
    ];

    html! {
        <section class="section location">
            <style>
                {r#"
                    .location {
                        position: relative;
                        overflow: hidden;
                    }
                    .decor-shape {
                        position: absolute;
                        pointer-events: none;
                        transition: all 0.7s;
                    }
                    .decor-inner {
                        width: 100%;
                        height: 100%;
                    }
                    .map-frame:hover .decor-animated {
                        transform: scale(1.1);
                        opacity: 0.5;
                    }
                    .location-grid {
                        position: relative;
                        z-index: 1;
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                        gap: 2rem 4rem;
                        margin-top: 3rem;
                    }
                    .map-frame {
                        position: relative;
                        border-radius: 8px;
                        overflow: hidden;
                        box-shadow: 0 16px 32px rgba(0, 0, 0, 0.15);
                    }
                    .map-frame iframe {
                        position: relative;
                        z-index: 1;
                        border: 0;
                        width: 100%;
                        height: 480px;
                    }
                    .contact-list {
                        display: flex;
                        flex-direction: column;
                        gap: 1.5rem;
                        padding: 2rem 1.5rem;
                        border: 1px solid rgba(8, 145, 178, 0.1);
                        border-radius: 16px;
                    }
                    .contact-row {
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                    }
                    .contact-label {
                        font-weight: 500;
                        min-width: 6rem;
                    }
                "#}
            </style>
            { for section_shapes.iter().map(|shape| html! {
                <DecorativeShape key={shape.id} shape={shape.clone()} animated={false} />
            }) }
            <h2 class="section-title">{ t.t("map.title") }</h2>
            <div class="location-grid">
                <div class="map-frame">
                    { for frame_shapes.iter().map(|shape| html! {
                        <DecorativeShape key={shape.id} shape={shape.clone()} />
                    }) }
                    <iframe
                        src={config::MAP_EMBED_URL}
                        loading="lazy"
                        allowfullscreen=true
                        title="Google Maps Location"
                    ></iframe>
                </div>
                <div class="contact-list">
                    { for details.into_iter().map(|(label_key, value, href)| html! {
                        <div class="contact-row" key={label_key}>
                            <span class="contact-label">{ t.t(label_key) }</span>
                            {
                                match href {
                                    Some(href) => html! { <a {href}>{ value }</a> },
                                    None => html! { <span>{ value }</span> },
                                }
                            }
                        </div>
                    }) }
                </div>
            </div>
        </section>
    }
}

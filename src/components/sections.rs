use yew::prelude::*;

use crate::i18n::Translator;
use crate::preferences::use_language;

/// `(translation key, image)` for each specialty.
const SERVICES: [(&str, &str); 8] = [
    ("services.urology", "/assets/urology.png"),
    ("services.dental", "/assets/dental.png"),
    ("services.fetal", "/assets/fetal.png"),
    ("services.ent", "/assets/ent.png"),
    ("services.cardiology", "/assets/cardiology.png"),
    ("services.cupping", "/assets/cupping.png"),
    ("services.dermatology", "/assets/dermatology.png"),
    ("services.neurology", "/assets/neurology.png"),
];

struct Doctor {
    name_key: &'static str,
    specialty_key: &'static str,
    photo: &'static str,
}

const DOCTORS: [Doctor; 6] = [
    Doctor { name_key: "doctors.basman", specialty_key: "doctors.urology", photo: "/assets/basman.jpeg" },
    Doctor { name_key: "doctors.roula", specialty_key: "doctors.gynecology", photo: "/assets/avatar-female.jpeg" },
    Doctor { name_key: "doctors.tawfiq", specialty_key: "doctors.general", photo: "/assets/avatar.jpeg" },
    Doctor { name_key: "doctors.mohamed", specialty_key: "doctors.neurological", photo: "/assets/avatar.jpeg" },
    Doctor { name_key: "doctors.hasab", specialty_key: "doctors.internal", photo: "/assets/avatar.jpeg" },
    Doctor { name_key: "doctors.mohsen", specialty_key: "doctors.cosmetic", photo: "/assets/avatar.jpeg" },
];

#[function_component(About)]
pub fn about() -> Html {
    let t = use_language().translations();
    html! {
        <section class="section">
            <h2 class="section-title">{ t.t("about.title") }</h2>
            <div class="about-text">
                <p class="description">{ t.t("about.description1") }</p>
                <p class="description">{ t.t("about.description2") }</p>
            </div>
        </section>
    }
}

#[function_component(Services)]
pub fn services() -> Html {
    let t = use_language().translations();
    html! {
        <section class="section">
            <h2 class="section-title">{ t.t("services.title") }</h2>
            <div class="card-grid">
                { for SERVICES.iter().map(|(key, image)| {
                    let label = t.t(key);
                    html! {
                        <div class="card" key={*key}>
                            <img src={*image} alt={label.clone()} loading="lazy" class="card-image" />
                            <p class="card-title">{ label }</p>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}

#[function_component(Doctors)]
pub fn doctors() -> Html {
    let t = use_language().translations();
    html! {
        <section class="section">
            <h2 class="section-title">{ t.t("doctors.title") }</h2>
            <div class="card-grid">
                { for DOCTORS.iter().map(|doctor| {
                    let name = t.t(doctor.name_key);
                    html! {
                        <div class="card doctor-card" key={doctor.name_key}>
                            <img src={doctor.photo} alt={name.clone()} loading="lazy" class="doctor-photo" />
                            <p class="card-title">{ name }</p>
                            <p class="description">{ t.t(doctor.specialty_key) }</p>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}

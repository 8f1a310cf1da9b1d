use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod error;
mod i18n;
mod notify;
mod preferences;
mod booking;
mod components {
    pub mod backtop;
    pub mod hero;
    pub mod location;
    pub mod reserve;
    pub mod sections;
    pub mod shapes;
    pub mod toast;
}
mod pages {
    pub mod home;
}

use components::toast::ToastProvider;
use i18n::Language;
use pages::home::{Home, NotFound};
use preferences::{DocumentRoot, LanguageContext, LanguageSettings, LocalStorage};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    let settings = use_memo(|_| LanguageSettings::init(LocalStorage, DocumentRoot), ());
    let language = use_state(|| settings.get());

    let change = {
        let settings = settings.clone();
        let language = language.clone();
        Callback::from(move |next: Language| {
            settings.set(next);
            language.set(next);
        })
    };
    let context = LanguageContext {
        language: *language,
        change,
    };

    html! {
        <ContextProvider<LanguageContext> {context}>
            <ToastProvider>
                <style>
                    {r#"
                        body {
                            margin: 0;
                            font-family: "Segoe UI", Tahoma, sans-serif;
                            color: #1f2937;
                        }
                        .section {
                            padding: 4rem 1rem;
                            max-width: 1200px;
                            margin: 0 auto;
                        }
                        .section-title {
                            text-align: center;
                            font-size: 2rem;
                            color: #0891b2;
                        }
                        .description {
                            color: #6b7280;
                            line-height: 1.6;
                        }
                        .about-text {
                            max-width: 800px;
                            margin: 0 auto;
                            text-align: center;
                        }
                        .card-grid {
                            display: grid;
                            grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
                            gap: 1.5rem;
                            margin-top: 2rem;
                        }
                        .card {
                            padding: 1.5rem;
                            border-radius: 12px;
                            text-align: center;
                            box-shadow: 0 4px 16px rgba(0, 0, 0, 0.08);
                            transition: transform 0.3s ease;
                        }
                        .card:hover {
                            transform: translateY(-4px);
                        }
                        .card-image {
                            width: 64px;
                            height: 64px;
                            object-fit: contain;
                        }
                        .doctor-photo {
                            width: 120px;
                            height: 120px;
                            border-radius: 50%;
                            object-fit: cover;
                        }
                        .card-title {
                            font-weight: 600;
                        }
                        .primary-button {
                            background: #006064;
                            color: #fff;
                            border: none;
                            border-radius: 999px;
                            padding: 0.75rem 2rem;
                            font-size: 1rem;
                            cursor: pointer;
                        }
                        .primary-button:hover:not(:disabled) {
                            background: #004d50;
                        }
                    "#}
                </style>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ToastProvider>
        </ContextProvider<LanguageContext>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting {}", config::CLINIC_NAME);
    yew::Renderer::<App>::new().render();
}

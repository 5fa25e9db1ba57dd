#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

use dioxus::prelude::*;
use log::{LevelFilter, error};

use mapty_domain as domain;
use mapty_storage::local_storage::LocalStorage;
use mapty_web_app::{self as web_app, SettingsService, geolocation, leaflet::Leaflet};

use component::sidebar::Sidebar;

mod component;

type Controller = domain::Controller<LocalStorage, Leaflet>;

const MAIN_CSS: Asset = asset!("/assets/main.css");
const MAP_ELEMENT_ID: &str = "map";

static WEB_APP_SERVICE: GlobalSignal<web_app::Service<LocalStorage>> =
    Signal::global(|| web_app::Service::new(LocalStorage));

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    let _ = web_app::log::init(LocalStorage, LevelFilter::Debug);
}

#[component]
fn App() -> Element {
    std::panic::set_hook(Box::new(|info| {
        error!("{info}");
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("main"))
            .map(|el| {
                el.set_inner_html(&format!("
                    <div class=\"error\">
                        <h2>Something went wrong</h2>
                        <p>An unexpected error occurred and the application cannot continue.</p>
                        <pre>{info}</pre>
                        <button class=\"form__btn\" onclick=\"location.reload()\">Reload page</button>
                    </div>
                "));
                Some(())
            });
    }));

    let settings = use_hook(|| WEB_APP_SERVICE.read().get_settings());
    let controller = use_signal(|| Controller::new(LocalStorage, settings.map_zoom));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Sidebar { controller }
        div {
            id: MAP_ELEMENT_ID,
            onmounted: move |_| load_map(controller, settings.clone()),
        }
    }
}

/// Create the map at the current position once it is known.
fn load_map(mut controller: Signal<Controller>, settings: web_app::Settings) {
    geolocation::request_position(
        move |position| {
            match Leaflet::new(MAP_ELEMENT_ID, &settings, move |target| {
                controller.write().map_clicked(target);
            }) {
                Ok(map) => controller.write().map_ready(position, map),
                Err(err) => error!("{err}"),
            }
        },
        move |err| {
            controller.write().location_failed(&err.to_string());
            web_app::alert("Could not get your position");
        },
    );
}

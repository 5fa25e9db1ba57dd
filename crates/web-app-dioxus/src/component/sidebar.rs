use dioxus::prelude::*;

use mapty_web_app as web_app;

use crate::{
    Controller,
    component::{log_view::LogView, workout_list::WorkoutList},
};

#[component]
pub fn Sidebar(controller: Signal<Controller>) -> Element {
    let mut controller = controller;
    let has_workouts = !controller.read().workouts().is_empty();

    rsx! {
        div {
            class: "sidebar",
            h1 { class: "logo", "Mapty" }
            WorkoutList { controller }
            if has_workouts {
                button {
                    class: "btn--clear",
                    onclick: move |_| {
                        if controller.write().clear().is_ok() {
                            web_app::reload();
                        }
                    },
                    "Clear all workouts"
                }
            }
            p {
                class: "copyright",
                "Map data from "
                a {
                    class: "copyright-link",
                    href: "https://www.openstreetmap.org/copyright",
                    target: "_blank",
                    "OpenStreetMap"
                }
            }
            LogView {}
        }
    }
}

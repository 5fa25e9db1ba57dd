use dioxus::prelude::*;

use mapty_web_app::render;

use crate::{Controller, component::form::WorkoutForm};

/// The form followed by all workouts, most recent first.
#[component]
pub fn WorkoutList(controller: Signal<Controller>) -> Element {
    let entries = render::list_entries(controller.read().workouts());

    let items = entries.into_iter().map(|entry| {
        let id = entry.id;
        let details = entry.details.into_iter().map(|detail| {
            rsx! {
                div {
                    class: "workout__details",
                    span { class: "workout__icon", "{detail.icon}" }
                    span { class: "workout__value", "{detail.value}" }
                    span { class: "workout__unit", "{detail.unit}" }
                }
            }
        });
        rsx! {
            li {
                key: "{id}",
                class: "{entry.class}",
                "data-id": "{id}",
                onclick: move |_| {
                    controller.peek().focus(id);
                },
                h2 { class: "workout__title", "{entry.title}" }
                {details}
            }
        }
    });

    rsx! {
        ul {
            class: "workouts",
            WorkoutForm { controller }
            {items}
        }
    }
}

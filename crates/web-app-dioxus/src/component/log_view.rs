use dioxus::prelude::*;

use crate::WEB_APP_SERVICE;

/// Collapsible list of the persisted log entries, newest first.
#[component]
pub fn LogView() -> Element {
    let content = match WEB_APP_SERVICE.read().get_log_entries() {
        Ok(entries) => {
            let items = entries.into_iter().map(|entry| {
                let class = format!(
                    "log__entry log__entry--{}",
                    entry.level.as_str().to_lowercase()
                );
                rsx! {
                    li {
                        class,
                        span { class: "log__time", "{entry.time}" }
                        " {entry.message}"
                    }
                }
            });
            rsx! {
                ul { {items} }
            }
        }
        Err(err) => rsx! {
            p { class: "log__entry", "{err}" }
        },
    };

    rsx! {
        details {
            class: "log",
            summary { "Log" }
            {content}
        }
    }
}

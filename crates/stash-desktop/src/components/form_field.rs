//! Labeled input with an inline validation message

use dioxus::prelude::*;

use stash_core::validation::ValidationReport;

use crate::state::AppState;

/// Message `report` holds for `field`, if any
pub fn field_message(report: Option<&ValidationReport>, field: &str) -> Option<String> {
    report
        .and_then(|report| report.field(field))
        .map(|error| error.message.clone())
}

#[component]
pub fn FormField(
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default)] error: Option<String>,
    #[props(default)] multiline: bool,
    #[props(default)] placeholder: String,
) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let border = if error.is_some() { colors.error } else { colors.border };
    let input_style = format!(
        "width: 100%; box-sizing: border-box; padding: 8px 10px; border: 1px solid {border}; \
         border-radius: 6px; font-size: 14px; font-family: inherit; outline: none; \
         background: {}; color: {};",
        colors.bg_secondary, colors.text_primary
    );

    rsx! {
        label {
            style: "display: block; margin-bottom: 12px;",
            span {
                style: "display: block; margin-bottom: 4px; font-size: 12px; font-weight: 600; color: {colors.text_secondary};",
                "{label}"
            }
            if multiline {
                textarea {
                    style: "{input_style} min-height: 110px; resize: vertical;",
                    value: "{value}",
                    placeholder: "{placeholder}",
                    oninput: move |evt| oninput.call(evt.value()),
                }
            } else {
                input {
                    r#type: "text",
                    style: "{input_style}",
                    value: "{value}",
                    placeholder: "{placeholder}",
                    oninput: move |evt| oninput.call(evt.value()),
                }
            }
            if let Some(message) = error {
                span {
                    style: "display: block; margin-top: 4px; font-size: 12px; color: {colors.error};",
                    "{message}"
                }
            }
        }
    }
}

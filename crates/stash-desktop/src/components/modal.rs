//! Modal overlay shared by forms and dialogs

use dioxus::prelude::*;

use crate::state::AppState;

/// Centered panel over a dimmed backdrop. Escape or a click on the backdrop
/// closes it.
#[component]
pub fn Modal(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    rsx! {
        div {
            style: "
                position: fixed;
                inset: 0;
                background: {colors.overlay};
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 100;
            ",
            onclick: move |_| on_close.call(()),
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Escape {
                    on_close.call(());
                }
            },

            div {
                role: "dialog",
                style: "
                    width: min(520px, 92vw);
                    max-height: 86vh;
                    overflow-y: auto;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    border: 1px solid {colors.border};
                    border-radius: 10px;
                    padding: 20px 22px;
                    box-shadow: 0 12px 40px rgba(0, 0, 0, 0.25);
                ",
                onclick: move |evt| evt.stop_propagation(),

                h2 {
                    style: "margin: 0 0 14px 0; font-size: 17px; font-weight: 600;",
                    "{title}"
                }
                {children}
            }
        }
    }
}

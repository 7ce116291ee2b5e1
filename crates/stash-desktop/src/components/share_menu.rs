//! Share menu: copy to clipboard or send by e-mail

use std::time::Duration;

use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};
use crate::state::AppState;

const STATUS_VISIBLE_MS: u64 = 2500;

/// Script writing `text` to the webview clipboard.
pub fn clipboard_script(text: &str) -> Option<String> {
    let literal = serde_json::to_string(text).ok()?;
    Some(format!("await navigator.clipboard.writeText({literal}); return true;"))
}

async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let script = clipboard_script(text).ok_or_else(|| "Could not encode text".to_string())?;
    document::eval(&script)
        .join::<bool>()
        .await
        .map(|_| ())
        .map_err(|error| format!("{error:?}"))
}

#[component]
pub fn ShareMenu(clipboard_text: String, mailto: String) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let mut status = use_signal(|| None::<Result<&'static str, String>>);

    let copy = move |_: MouseEvent| {
        let text = clipboard_text.clone();
        spawn(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => status.set(Some(Ok("Copied to clipboard"))),
                Err(error) => {
                    tracing::warn!("Clipboard write failed: {error}");
                    status.set(Some(Err("Could not copy to clipboard".to_string())));
                }
            }
            tokio::time::sleep(Duration::from_millis(STATUS_VISIBLE_MS)).await;
            status.set(None);
        });
    };

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 8px;",
            Button { variant: ButtonVariant::Secondary, onclick: copy, "Copy" }
            a {
                href: "{mailto}",
                style: "
                    padding: 6px 14px;
                    border-radius: 6px;
                    border: 1px solid {colors.border};
                    background: {colors.bg_tertiary};
                    color: {colors.text_primary};
                    font-size: 13px;
                    text-decoration: none;
                ",
                "Email"
            }
            match status() {
                Some(Ok(message)) => rsx! {
                    span { style: "font-size: 12px; color: {colors.text_muted};", "{message}" }
                },
                Some(Err(message)) => rsx! {
                    span { style: "font-size: 12px; color: {colors.error};", "{message}" }
                },
                None => rsx! {},
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_script_escapes_the_text() {
        let script = clipboard_script("say \"hi\"\n</script>").unwrap();
        assert_eq!(
            script,
            r#"await navigator.clipboard.writeText("say \"hi\"\n</script>"); return true;"#
        );
    }
}

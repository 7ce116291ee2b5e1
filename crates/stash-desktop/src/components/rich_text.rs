//! Rich-text note body: a contenteditable surface with a formatting toolbar.
//!
//! Formatting runs through the webview's `execCommand`; the body markup is
//! read back with [`read_editor_html`] when the note is saved.

use dioxus::prelude::*;

use stash_core::markup::sanitize_html;
use stash_core::util::is_http_url;

use crate::state::AppState;

/// DOM id of the editable body
pub const EDITOR_ELEMENT_ID: &str = "stash-note-body";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strike,
    Heading1,
    Heading2,
    OrderedList,
    BulletList,
    Link,
    Image,
}

impl FormatCommand {
    pub const TOOLBAR: [Self; 10] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strike,
        Self::Heading1,
        Self::Heading2,
        Self::OrderedList,
        Self::BulletList,
        Self::Link,
        Self::Image,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Underline => "U",
            Self::Strike => "S",
            Self::Heading1 => "H1",
            Self::Heading2 => "H2",
            Self::OrderedList => "1.",
            Self::BulletList => "\u{2022}",
            Self::Link => "Link",
            Self::Image => "Image",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::Strike => "Strikethrough",
            Self::Heading1 => "Heading 1",
            Self::Heading2 => "Heading 2",
            Self::OrderedList => "Numbered list",
            Self::BulletList => "Bullet list",
            Self::Link => "Link the selection to the URL",
            Self::Image => "Insert the image at the URL",
        }
    }

    /// Commands that take the URL from the toolbar input
    pub const fn needs_url(self) -> bool {
        matches!(self, Self::Link | Self::Image)
    }

    const fn exec_name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strike => "strikeThrough",
            Self::Heading1 | Self::Heading2 => "formatBlock",
            Self::OrderedList => "insertOrderedList",
            Self::BulletList => "insertUnorderedList",
            Self::Link => "createLink",
            Self::Image => "insertImage",
        }
    }

    /// Script applying this command to the editor selection. Link and image
    /// commands need an http(s) `url`; `None` is returned without one.
    pub fn script(self, url: Option<&str>) -> Option<String> {
        let value = match self {
            Self::Heading1 => Some("<h1>".to_string()),
            Self::Heading2 => Some("<h2>".to_string()),
            Self::Link | Self::Image => {
                let url = url.map(str::trim).filter(|url| is_http_url(url))?;
                Some(url.to_string())
            }
            _ => None,
        };
        let element = serde_json::to_string(EDITOR_ELEMENT_ID).ok()?;
        let name = serde_json::to_string(self.exec_name()).ok()?;
        let value = serde_json::to_string(&value).ok()?;
        Some(format!(
            "document.getElementById({element}).focus(); \
             document.execCommand({name}, false, {value}); return true;"
        ))
    }
}

/// Current markup of the editor body
pub async fn read_editor_html() -> Result<String, String> {
    let element = serde_json::to_string(EDITOR_ELEMENT_ID).map_err(|error| error.to_string())?;
    document::eval(&format!(
        "const body = document.getElementById({element}); return body ? body.innerHTML : \"\";"
    ))
    .join::<String>()
    .await
    .map_err(|error| format!("{error:?}"))
}

#[component]
pub fn RichTextEditor(initial_html: String) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let mut url = use_signal(String::new);
    let mut hint = use_signal(|| None::<&'static str>);
    let markup = sanitize_html(&initial_html);

    let mut apply = move |command: FormatCommand| {
        let target = url();
        let Some(script) = command.script(Some(&target)) else {
            hint.set(Some("Enter an http(s) URL first"));
            return;
        };
        hint.set(None);
        if command.needs_url() {
            url.set(String::new());
        }
        spawn(async move {
            if let Err(error) = document::eval(&script).join::<bool>().await {
                tracing::warn!("Formatting command {command:?} failed: {error:?}");
            }
        });
    };

    rsx! {
        div {
            style: "border: 1px solid {colors.border}; border-radius: 8px; background: {colors.bg_primary};",

            div {
                role: "toolbar",
                style: "
                    display: flex;
                    flex-wrap: wrap;
                    align-items: center;
                    gap: 4px;
                    padding: 6px 8px;
                    border-bottom: 1px solid {colors.border};
                    background: {colors.bg_secondary};
                    border-radius: 8px 8px 0 0;
                ",
                for command in FormatCommand::TOOLBAR {
                    button {
                        r#type: "button",
                        title: command.description(),
                        style: "
                            min-width: 30px;
                            padding: 4px 8px;
                            border: 1px solid transparent;
                            border-radius: 4px;
                            background: transparent;
                            color: {colors.text_primary};
                            font-size: 13px;
                            cursor: pointer;
                        ",
                        onmousedown: move |evt| evt.prevent_default(),
                        onclick: move |_| apply(command),
                        "{command.label()}"
                    }
                }
                input {
                    r#type: "url",
                    placeholder: "https:// for link or image",
                    value: "{url}",
                    oninput: move |evt| url.set(evt.value()),
                    style: "
                        flex: 1;
                        min-width: 160px;
                        padding: 4px 8px;
                        border: 1px solid {colors.border};
                        border-radius: 4px;
                        font-size: 12px;
                        background: {colors.bg_primary};
                        color: {colors.text_primary};
                    ",
                }
                if let Some(message) = hint() {
                    span { style: "font-size: 12px; color: {colors.error};", "{message}" }
                }
            }

            div {
                id: EDITOR_ELEMENT_ID,
                class: "note-body",
                contenteditable: "true",
                style: "
                    min-height: 320px;
                    padding: 14px 16px;
                    outline: none;
                    line-height: 1.6;
                    color: {colors.text_primary};
                ",
                dangerous_inner_html: "{markup}",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn inline_commands_pass_no_value() {
        assert_eq!(
            FormatCommand::Strike.script(None).unwrap(),
            "document.getElementById(\"stash-note-body\").focus(); \
             document.execCommand(\"strikeThrough\", false, null); return true;"
        );
    }

    #[test]
    fn headings_format_the_block() {
        let script = FormatCommand::Heading2.script(None).unwrap();
        assert!(script.contains("execCommand(\"formatBlock\", false, \"<h2>\")"));
    }

    #[test]
    fn link_and_image_require_http_urls() {
        assert_eq!(FormatCommand::Link.script(None), None);
        assert_eq!(FormatCommand::Image.script(Some("javascript:alert(1)")), None);

        let script = FormatCommand::Link
            .script(Some(" https://example.com/a?b=\"c\" "))
            .unwrap();
        assert!(script.contains(r#"execCommand("createLink", false, "https://example.com/a?b=\"c\"")"#));
    }

    #[test]
    fn toolbar_lists_every_command_once() {
        let names: std::collections::HashSet<_> = FormatCommand::TOOLBAR
            .iter()
            .map(|command| command.exec_name().to_string() + command.label())
            .collect();
        assert_eq!(names.len(), FormatCommand::TOOLBAR.len());
        assert_eq!(
            FormatCommand::TOOLBAR
                .iter()
                .filter(|command| command.needs_url())
                .count(),
            2
        );
    }
}

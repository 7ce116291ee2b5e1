//! Button component

use dioxus::prelude::*;

use crate::state::AppState;
use crate::theme::ColorPalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Destructive,
    Ghost,
}

impl ButtonVariant {
    fn colors(self, palette: &ColorPalette) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Primary => (palette.accent, palette.accent_text, palette.accent),
            Self::Secondary => (palette.bg_tertiary, palette.text_primary, palette.border),
            Self::Destructive => (palette.error, palette.accent_text, palette.error),
            Self::Ghost => ("transparent", palette.text_secondary, "transparent"),
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    #[props(default)] title: String,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let state = use_context::<AppState>();
    let (background, foreground, border) = variant.colors(state.palette());
    let opacity = if disabled { "0.55" } else { "1" };
    let cursor = if disabled { "default" } else { "pointer" };

    rsx! {
        button {
            r#type: "button",
            title: "{title}",
            disabled: disabled,
            style: "
                padding: 6px 14px;
                border-radius: 6px;
                border: 1px solid {border};
                background: {background};
                color: {foreground};
                font-size: 13px;
                font-weight: 500;
                cursor: {cursor};
                opacity: {opacity};
            ",
            onclick: move |evt| {
                if !disabled {
                    onclick.call(evt);
                }
            },
            {children}
        }
    }
}

use std::borrow::Cow;

use color::{Color, NamedColor};
use colored::Colorize;
use serde::{Deserialize, Serialize};

pub mod color;

/// Represents a chat Text component
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TextComponent<'a> {
    /// The actual text
    pub text: Cow<'a, str>,
    /// Style of the text. Bold, Italic, Color...
    #[serde(flatten)]
    pub style: Style,
    /// Extra text components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent<'a>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<bool>,
}

impl<'a> TextComponent<'a> {
    pub fn text(text: &'a str) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn text_string(text: String) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn add_child(mut self, child: TextComponent<'a>) -> Self {
        self.extra.push(child);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.style.color = Some(color);
        self
    }

    pub fn color_named(mut self, color: NamedColor) -> Self {
        self.style.color = Some(Color::Named(color));
        self
    }

    /// The text of this component and its children, without any styling.
    pub fn plain(&self) -> String {
        let mut text = self.text.to_string();
        for child in &self.extra {
            text += &child.plain();
        }
        text
    }

    pub fn to_pretty_console(&self) -> String {
        let mut text = self.text.to_string();
        if let Some(color) = self.style.color {
            text = color.console_color(&text).to_string();
        }
        if self.style.bold.is_some() {
            text = text.bold().to_string();
        }
        if self.style.italic.is_some() {
            text = text.italic().to_string();
        }
        if self.style.underlined.is_some() {
            text = text.underline().to_string();
        }
        if self.style.strikethrough.is_some() {
            text = text.strikethrough().to_string();
        }
        for child in &self.extra {
            text += &child.to_pretty_console();
        }
        text
    }

    /// Renders the component with legacy `§` formatting codes, the way old
    /// clients and plain chat logs expect it.
    pub fn to_legacy(&self) -> String {
        let mut text = String::new();
        if let Some(color) = self.style.color {
            text.push('§');
            text.push(color.legacy_code());
        }
        for (set, code) in [
            (self.style.obfuscated, 'k'),
            (self.style.bold, 'l'),
            (self.style.strikethrough, 'm'),
            (self.style.underlined, 'n'),
            (self.style.italic, 'o'),
        ] {
            if set == Some(true) {
                text.push('§');
                text.push(code);
            }
        }
        text += &self.text;
        for child in &self.extra {
            text += &child.to_legacy();
        }
        text
    }

    /// Parses text using `&` colour codes (`&a`, `&l`, `&r`, ...) into a
    /// component with one child per styled run. An `&` that is not followed
    /// by a known code is kept as text.
    pub fn from_ampersand(input: &str) -> TextComponent<'static> {
        let mut root = TextComponent::default();
        let mut style = Style::default();
        let mut run = String::new();
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '&' {
                if let Some(next) = chars.peek().copied() {
                    let mut next_style = style.clone();
                    if apply_code(next, &mut next_style) {
                        chars.next();
                        if !run.is_empty() {
                            root.extra.push(TextComponent {
                                text: Cow::Owned(std::mem::take(&mut run)),
                                style,
                                extra: vec![],
                            });
                        }
                        style = next_style;
                        continue;
                    }
                }
            }
            run.push(ch);
        }
        if !run.is_empty() {
            root.extra.push(TextComponent {
                text: Cow::Owned(run),
                style,
                extra: vec![],
            });
        }
        root
    }
}

/// Applies a formatting code to `style`. Returns false for unknown codes.
fn apply_code(code: char, style: &mut Style) -> bool {
    if let Some(color) = NamedColor::from_code(code) {
        *style = color_style(color);
        return true;
    }
    match code.to_ascii_lowercase() {
        'k' => style.obfuscated = Some(true),
        'l' => style.bold = Some(true),
        'm' => style.strikethrough = Some(true),
        'n' => style.underlined = Some(true),
        'o' => style.italic = Some(true),
        'r' => *style = Style::default(),
        _ => return false,
    }
    true
}

// A colour code resets any formatting that came before it.
fn color_style(color: NamedColor) -> Style {
    Style {
        color: Some(Color::Named(color)),
        ..Default::default()
    }
}

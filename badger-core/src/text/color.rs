use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

/// Text color
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Color {
    /// Whatever color the chat line started with.
    #[default]
    Reset,
    Named(NamedColor),
}

impl Color {
    pub fn console_color(&self, text: &str) -> ColoredString {
        match self {
            Color::Reset => text.clear(),
            Color::Named(color) => color.paint(text),
        }
    }

    /// The legacy `§` formatting code for this color.
    pub const fn legacy_code(&self) -> char {
        match self {
            Color::Reset => 'r',
            Color::Named(color) => color.code(),
        }
    }
}

macro_rules! named_colors {
    ($($variant:ident = ($code:literal, $name:literal, $paint:ident)),+ $(,)?) => {
        /// The 16 chat colors of the legacy formatting codes.
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum NamedColor {
            $($variant,)+
        }

        impl NamedColor {
            pub const ALL: &'static [NamedColor] = &[$(NamedColor::$variant,)+];

            /// The character after `§` or `&`.
            pub const fn code(self) -> char {
                match self {
                    $(NamedColor::$variant => $code,)+
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(NamedColor::$variant => $name,)+
                }
            }

            /// Closest terminal color.
            fn paint(self, text: &str) -> ColoredString {
                match self {
                    $(NamedColor::$variant => text.$paint(),)+
                }
            }
        }
    };
}

named_colors![
    Black = ('0', "black", black),
    DarkBlue = ('1', "dark_blue", blue),
    DarkGreen = ('2', "dark_green", green),
    DarkAqua = ('3', "dark_aqua", cyan),
    DarkRed = ('4', "dark_red", red),
    DarkPurple = ('5', "dark_purple", purple),
    Gold = ('6', "gold", yellow),
    Gray = ('7', "gray", white),
    DarkGray = ('8', "dark_gray", bright_black),
    Blue = ('9', "blue", bright_blue),
    Green = ('a', "green", bright_green),
    Aqua = ('b', "aqua", bright_cyan),
    Red = ('c', "red", bright_red),
    LightPurple = ('d', "light_purple", bright_purple),
    Yellow = ('e', "yellow", bright_yellow),
    White = ('f', "white", bright_white),
];

impl NamedColor {
    /// Looks a color up by its code character, ignoring case.
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.iter().copied().find(|color| color.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }
}

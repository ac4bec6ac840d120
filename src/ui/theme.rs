//! Named color themes for the calculator frame.
//!
//! Colors are 256-color palette indices. Translucency drops the background
//! fill and dims the frame so the terminal's own background shows through.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown theme '{name}' (known themes: {known})")]
pub struct UnknownTheme {
    pub name: String,
    pub known: String,
}

/// The themes a user can pick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Classic,
    Dark,
    Light,
    Ocean,
    Sunset,
}

impl ThemeName {
    pub const ALL: [ThemeName; 5] = [
        Self::Classic,
        Self::Dark,
        Self::Light,
        Self::Ocean,
        Self::Sunset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Ocean => "ocean",
            Self::Sunset => "sunset",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTheme {
                name: wanted.to_string(),
                known: Self::ALL.map(ThemeName::as_str).join(", "),
            })
    }
}

/// Resolved styles for each part of the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    pub frame: Style,
    pub panel: Style,
    pub tape: Style,
    pub value: Style,
    pub error: Style,
    pub caption: Style,
}

impl Theme {
    /// Remove background fills and dim the chrome.
    pub fn translucent(mut self) -> Self {
        for style in [
            &mut self.frame,
            &mut self.panel,
            &mut self.tape,
            &mut self.value,
            &mut self.error,
            &mut self.caption,
        ] {
            style.bg = None;
        }
        self.frame = self.frame.add_modifier(Modifier::DIM);
        self.caption = self.caption.add_modifier(Modifier::DIM);
        self
    }
}

/// Build a theme from 256-color palette indices.
fn palette(
    name: ThemeName,
    frame: u8,
    fill: u8,
    tape: u8,
    value: u8,
    error: u8,
    caption: u8,
) -> Theme {
    let panel = Style::default().bg(Color::Indexed(fill));
    Theme {
        name,
        frame: Style::default().fg(Color::Indexed(frame)),
        panel,
        tape: panel.fg(Color::Indexed(tape)),
        value: panel.fg(Color::Indexed(value)).add_modifier(Modifier::BOLD),
        error: panel.fg(Color::Indexed(error)).add_modifier(Modifier::BOLD),
        caption: Style::default().fg(Color::Indexed(caption)),
    }
}

/// Get the styles of a named theme.
pub fn theme(name: ThemeName) -> Theme {
    match name {
        ThemeName::Classic => palette(name, 244, 236, 246, 255, 209, 242),
        ThemeName::Dark => palette(name, 238, 233, 243, 252, 203, 240),
        ThemeName::Light => palette(name, 250, 255, 244, 234, 160, 246),
        ThemeName::Ocean => palette(name, 31, 17, 74, 159, 210, 67),
        ThemeName::Sunset => palette(name, 173, 52, 216, 230, 226, 137),
    }
}

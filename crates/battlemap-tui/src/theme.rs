//! Colour theme for the battlemap TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::by_name`] at startup and pass the result through the
//! application as a shared reference.
//!
//! # Route colours
//!
//! The renderer assigns every route one of the nineteen named marker colours
//! in [`RouteColor`]. The `[routes]` table of a theme maps each name to the
//! terminal colour it is drawn with; names a theme leaves out fall back to the
//! closest basic terminal colour.

use std::collections::HashMap;

use battlemap_core::RouteColor;
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types, mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawList {
    cursor: RawStyle,
    selected: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawMap {
    land: RawStyle,
    label: RawStyle,
    focus: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    bar: RawStyle,
    hint: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawError {
    banner: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    list: RawList,
    map: RawMap,
    status: RawStatus,
    error: RawError,
    #[serde(default)]
    routes: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// All styles are pre-resolved ratatui [`Style`] values; no allocation at
/// render time.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for the command bar pane
    pub border_command_bar: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,

    /// Row under the cursor in a focused list.
    pub list_cursor: Style,
    /// The committed choice in a list or radio group.
    pub list_selected: Style,

    /// Coastline drawing on the map canvas.
    pub map_land: Style,
    /// Timestamp labels printed beside markers.
    pub map_label: Style,
    /// The focused marker glyph.
    pub map_focus: Style,

    pub status_bar: Style,
    pub status_hint: Style,

    pub error_banner: Style,

    route_colors: HashMap<RouteColor, Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme by its configured name. Unknown names get the default.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            other => {
                if other != "default" {
                    tracing::debug!(theme = other, "unknown theme, using default");
                }
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored. Route colour entries whose key is not one of
    /// the palette names, or whose value does not parse, are skipped.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let route_colors = battlemap_core::render::PALETTE
            .iter()
            .filter_map(|rc| {
                let value = raw.routes.get(rc.name())?;
                Some((*rc, parse_color(value)?))
            })
            .collect();

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            list_cursor: raw.list.cursor.into_style(),
            list_selected: raw.list.selected.into_style(),
            map_land: raw.map.land.into_style(),
            map_label: raw.map.label.into_style(),
            map_focus: raw.map.focus.into_style(),
            status_bar: raw.status.bar.into_style(),
            status_hint: raw.status.hint.into_style(),
            error_banner: raw.error.banner.into_style(),
            route_colors,
        })
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    /// Terminal colour a route is drawn with.
    pub fn route_color(&self, color: RouteColor) -> Color {
        self.route_colors
            .get(&color)
            .copied()
            .unwrap_or_else(|| fallback_color(color))
    }

    pub fn route_style(&self, color: RouteColor) -> Style {
        Style::default().fg(self.route_color(color))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fallback_color(color: RouteColor) -> Color {
    use RouteColor::*;
    match color {
        Red | DarkRed => Color::Red,
        LightRed | Pink => Color::LightRed,
        Blue | DarkBlue | CadetBlue => Color::Blue,
        LightBlue => Color::LightBlue,
        Green | DarkGreen => Color::Green,
        LightGreen => Color::LightGreen,
        Purple | DarkPurple => Color::Magenta,
        Orange | Beige => Color::Yellow,
        White => Color::White,
        Gray | Black => Color::DarkGray,
        LightGray => Color::Gray,
    }
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

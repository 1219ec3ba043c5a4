//! Colour theme for the sigmon TUI.
//!
//! Themes are TOML files. The default theme is embedded via [`include_str!`]
//! so the monitor works without any files on disk; a user theme is layered
//! over it with the `config` crate, so a partial file only overrides the keys
//! it names.

use std::path::Path;

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use sigmon_core::{ConnectionHealth, Side, SignalStatus};

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
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
        let flags = [
            (self.bold, Modifier::BOLD),
            (self.dim, Modifier::DIM),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
        ];
        for (on, modifier) in flags {
            if on {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    sent: RawStyle,
    failed: RawStyle,
    pending: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSide {
    buy: RawStyle,
    sell: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawConnection {
    connected: RawStyle,
    disconnected: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    header: RawStyle,
    sort_column: RawStyle,
    muted: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    info: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    status: RawStatus,
    side: RawSide,
    connection: RawConnection,
    borders: RawBorders,
    table: RawTable,
    message: RawMessage,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Pre-resolved ratatui styles; no parsing happens at render time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub status_sent: Style,
    pub status_failed: Style,
    pub status_pending: Style,

    pub side_buy: Style,
    pub side_sell: Style,

    pub connected: Style,
    pub disconnected: Style,

    pub border_focused: Style,
    pub border_unfocused: Style,

    pub header: Style,
    /// Header cell of the column the table is sorted by.
    pub sort_column: Style,
    /// Placeholder and footer text.
    pub muted: Style,

    pub message_info: Style,
    pub message_error: Style,
}

impl Theme {
    /// Load the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the `theme` tests
    /// rule out.
    pub fn load_default() -> Self {
        Self::from_sources(None).expect("embedded default theme must be valid TOML")
    }

    /// Layer a user theme file over the default. A missing file yields the
    /// default theme.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        Self::from_sources(Some(path))
    }

    /// Parse a complete theme from a TOML string.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(Self::from_raw(raw))
    }

    fn from_sources(user: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_THEME_SRC, FileFormat::Toml));
        if let Some(path) = user {
            builder = builder.add_source(File::from(path).required(false));
        }
        let raw: RawTheme = builder.build()?.try_deserialize()?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawTheme) -> Self {
        Self {
            status_sent: raw.status.sent.into_style(),
            status_failed: raw.status.failed.into_style(),
            status_pending: raw.status.pending.into_style(),
            side_buy: raw.side.buy.into_style(),
            side_sell: raw.side.sell.into_style(),
            connected: raw.connection.connected.into_style(),
            disconnected: raw.connection.disconnected.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            header: raw.table.header.into_style(),
            sort_column: raw.table.sort_column.into_style(),
            muted: raw.table.muted.into_style(),
            message_info: raw.message.info.into_style(),
            message_error: raw.message.error.into_style(),
        }
    }

    pub fn status_style(&self, status: SignalStatus) -> Style {
        match status {
            SignalStatus::Sent => self.status_sent,
            SignalStatus::Failed => self.status_failed,
            SignalStatus::Pending => self.status_pending,
        }
    }

    pub fn side_style(&self, side: Side) -> Style {
        match side {
            Side::Buy => self.side_buy,
            Side::Sell => self.side_sell,
        }
    }

    pub fn connection_style(&self, health: ConnectionHealth) -> Style {
        match health {
            ConnectionHealth::Connected => self.connected,
            ConnectionHealth::Disconnected => self.disconnected,
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (case-insensitive), `#rrggbb`, and
/// `indexed:N`.
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

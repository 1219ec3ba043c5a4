//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `/`                     | `FilterFocus`              |
//! | `s`                     | `CycleStatus`              |
//! | `1` … `7`               | `SortBy(column)`           |
//! | `←` / `h`               | `Nav(Left)` (previous page)|
//! | `→` / `l`               | `Nav(Right)` (next page)   |
//! | `Home` / `g`            | `FirstPage`                |
//! | `End` / `G`             | `LastPage`                 |
//! | `e`                     | `Export(Csv)`              |
//! | `E`                     | `Export(Jsonl)`            |
//! | `x`                     | `ClearFilters`             |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While the filter bar is focused the event loop calls
//! [`to_app_event_insert`]: every printable character is forwarded as `Char`,
//! arrows move the text cursor, and only `Ctrl+c`, `Esc`, `Enter` and
//! `Backspace` keep their special meaning.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use sigmon_core::export::ExportFormat;
use sigmon_core::SortField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move focus to the filter bar.
    FilterFocus,
    /// Step the status filter: all → sent → failed → pending → all.
    CycleStatus,
    /// Column header "click": toggles direction on the active column.
    SortBy(SortField),
    /// Page navigation in normal mode, cursor movement in insert mode.
    Nav(Direction),
    FirstPage,
    LastPage,
    Export(ExportFormat),
    /// Reset the query and status filter.
    ClearFilters,
    Char(char),
    Backspace,
    Enter,
    Escape,
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] in normal (navigation) mode.
///
/// Returns `None` for mouse events and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] while a text input has focus.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let plain = key.modifiers == Mod::NONE;
    let shifted = plain || key.modifiers == Mod::SHIFT;

    match key.code {
        Char('q') if plain => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Char('/') if plain => Some(AppEvent::FilterFocus),
        Char('s') if plain => Some(AppEvent::CycleStatus),
        Char('x') if plain => Some(AppEvent::ClearFilters),

        // Column shortcuts follow the table's left-to-right order.
        Char(c @ '1'..='7') if plain => {
            let idx = c as usize - '1' as usize;
            Some(AppEvent::SortBy(SortField::ALL[idx]))
        }

        Left | Char('h') if plain => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if plain => Some(AppEvent::Nav(Direction::Right)),
        Home | Char('g') if plain => Some(AppEvent::FirstPage),
        // 'G' may or may not carry SHIFT depending on the terminal
        End => Some(AppEvent::LastPage),
        Char('G') if shifted => Some(AppEvent::LastPage),

        Char('e') if plain => Some(AppEvent::Export(ExportFormat::Csv)),
        Char('E') if shifted => Some(AppEvent::Export(ExportFormat::Jsonl)),

        Char(c) if shifted => Some(AppEvent::Char(c)),
        Backspace if plain => Some(AppEvent::Backspace),
        Enter if plain => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

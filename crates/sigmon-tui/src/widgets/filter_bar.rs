//! Filter bar: free-text query input plus the active status filter.
//!
//! Editing happens in insert mode: `Char` inserts at the cursor, `Backspace`
//! deletes before it, `Nav(Left/Right)` moves it. The query is applied live
//! on every keystroke; `Enter` or `Esc` returns focus to the table.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use sigmon_core::StatusFilter;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FilterBarState {
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl FilterBarState {
    /// Apply an editing event. Returns `true` when the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "filter: char inserted");
                true
            }
            AppEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, cursor = self.cursor, "filter: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = self.query[self.cursor..]
                    .chars()
                    .next()
                    .map_or(self.cursor, |c| self.cursor + c.len_utf8());
                false
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor]
            .char_indices()
            .last()
            .map_or(0, |(i, _)| i)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterBar<'a> {
    state: &'a FilterBarState,
    status: StatusFilter,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(
        state: &'a FilterBarState,
        status: StatusFilter,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, status, focused, theme }
    }

    /// Terminal position of the text cursor inside `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Filter ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(18)])
            .split(inner);

        let query = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled("press / to search symbol, IP or side", self.theme.muted))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query).render(chunks[0], buf);

        let status_style = match self.status {
            StatusFilter::All => self.theme.muted,
            StatusFilter::Only(s) => self.theme.status_style(s),
        };
        let status = Line::from(vec![
            Span::raw("status: "),
            Span::styled(self.status.to_string(), status_style),
        ]);
        Paragraph::new(status).render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

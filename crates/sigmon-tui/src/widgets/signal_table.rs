//! Signal table: one page of the current view plus its pagination footer.
//!
//! The header of the sorted column carries a `▲`/`▼` marker and its `1`–`7`
//! shortcut. When nothing matches, the table body is replaced by a single
//! message and the footer is hidden.

use crate::theme::Theme;
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, Widget},
};
use sigmon_core::view::Page;
use sigmon_core::{SignalRecord, SortDirection, SortField, SortKey};

pub const EMPTY_MESSAGE: &str = "No signals match your current search criteria.";

const WIDTHS: [Constraint; 7] = [
    Constraint::Length(24),
    Constraint::Length(10),
    Constraint::Length(8),
    Constraint::Length(10),
    Constraint::Length(10),
    Constraint::Fill(1),
    Constraint::Length(10),
];

pub struct SignalTable<'a> {
    page: &'a Page<'a>,
    sort: SortKey,
    timestamp_format: &'a str,
    theme: &'a Theme,
}

impl<'a> SignalTable<'a> {
    pub fn new(page: &'a Page<'a>, sort: SortKey, timestamp_format: &'a str, theme: &'a Theme) -> Self {
        Self { page, sort, timestamp_format, theme }
    }

    fn header(&self) -> Row<'static> {
        let cells = SortField::ALL.iter().enumerate().map(|(i, &field)| {
            let style = if field == self.sort.field {
                self.theme.sort_column
            } else {
                self.theme.header
            };
            Cell::from(Span::styled(header_label(i, field, self.sort), style))
        });
        Row::new(cells)
    }

    fn row(&self, record: &SignalRecord) -> Row<'static> {
        let ts = record
            .timestamp
            .with_timezone(&Local)
            .format(self.timestamp_format)
            .to_string();
        Row::new([
            Cell::from(ts),
            Cell::from(record.symbol.clone()),
            Cell::from(Span::styled(record.side.label(), self.theme.side_style(record.side))),
            Cell::from(record.volume.to_string()),
            Cell::from(record.price.to_string()),
            Cell::from(record.origin.clone()),
            Cell::from(Span::styled(record.status.label(), self.theme.status_style(record.status))),
        ])
    }
}

/// `"1 Timestamp ▼"` for the sorted column, `"2 Symbol"` otherwise.
pub fn header_label(index: usize, field: SortField, sort: SortKey) -> String {
    let mut label = format!("{} {}", index + 1, field.label());
    if field == sort.field {
        label.push_str(match sort.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        });
    }
    label
}

/// `"Showing 11 to 20 of 35 results  ·  page 2/4"`, or `None` when the
/// view is empty.
pub fn footer_text(page: &Page<'_>) -> Option<String> {
    let (first, last) = page.showing_range()?;
    Some(format!(
        "Showing {first} to {last} of {} results  ·  page {}/{}",
        page.total_matching, page.page, page.total_pages
    ))
}

impl Widget for SignalTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Signals ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(inner);

        if self.page.records.is_empty() {
            let body = Layout::default()
                .direction(LayoutDir::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(2), Constraint::Length(1)])
                .split(chunks[0]);
            Table::new(Vec::<Row>::new(), WIDTHS)
                .header(self.header())
                .render(body[0], buf);
            Paragraph::new(Line::from(Span::styled(EMPTY_MESSAGE, self.theme.muted)))
                .centered()
                .render(body[2], buf);
            return;
        }

        let rows: Vec<Row> = self.page.records.iter().map(|r| self.row(r)).collect();
        Table::new(rows, WIDTHS)
            .header(self.header())
            .column_spacing(1)
            .render(chunks[0], buf);

        if let Some(text) = footer_text(self.page) {
            let mut spans = vec![Span::styled(text, self.theme.muted)];
            let nav = match (self.page.has_prev(), self.page.has_next()) {
                (true, true) => "   ← prev  next →",
                (true, false) => "   ← prev",
                (false, true) => "   next →",
                (false, false) => "",
            };
            spans.push(Span::raw(nav));
            Paragraph::new(Line::from(spans)).render(chunks[1], buf);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

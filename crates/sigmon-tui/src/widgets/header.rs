//! Header line: title, connection indicator, and store counters.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use sigmon_core::stats::FeedStats;
use sigmon_core::{ConnectionHealth, SignalStatus};

pub struct Header<'a> {
    health: ConnectionHealth,
    stats: &'a FeedStats,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(health: ConnectionHealth, stats: &'a FeedStats, theme: &'a Theme) -> Self {
        Self { health, stats, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let indicator = match self.health {
            ConnectionHealth::Connected => "● Live",
            ConnectionHealth::Disconnected => "● Disconnected",
        };

        let mut spans = vec![
            Span::styled(" Signal Monitor ", self.theme.header.remove_modifier(Modifier::UNDERLINED)),
            Span::styled(indicator, self.theme.connection_style(self.health)),
            Span::raw("   "),
            Span::raw(format!("{} signals  ", self.stats.total)),
        ];
        for status in SignalStatus::ALL {
            spans.push(Span::styled(
                format!("{} {}  ", self.stats.count(status), status),
                self.theme.status_style(status),
            ));
        }
        if self.stats.evicted > 0 {
            spans.push(Span::styled(format!("({} evicted)", self.stats.evicted), self.theme.muted));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.muted);
    }
}

//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Between frames the loop
//! drains the feed channel into the [`Monitor`], so the UI thread is the only
//! writer to the store.

use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use sigmon_core::config::Config;
use sigmon_core::export::ExportFormat;
use sigmon_core::Monitor;
use sigmon_feeds::FeedEvent;
use tokio::sync::mpsc;

use crate::{
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        filter_bar::{FilterBar, FilterBarState},
        header::Header,
        help::HelpPopup,
        signal_table::SignalTable,
    },
};

/// How long an export or error message stays in the status line.
const MESSAGE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    FilterBar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub monitor: Monitor,
    pub filter: FilterBarState,
    /// Requested 1-based page; the view clamps it when records shrink.
    pub page: usize,
    pub focus: Focus,
    pub show_help: bool,
    pub message: Option<(StatusMessage, Instant)>,
    pub theme: Theme,
    pub config: Config,
    pub quit: bool,
}

impl AppState {
    pub fn new(monitor: Monitor, config: Config, theme: Theme) -> Self {
        Self {
            monitor,
            filter: FilterBarState::default(),
            page: 1,
            focus: Focus::Table,
            show_help: false,
            message: None,
            theme,
            config,
            quit: false,
        }
    }

    fn page_size(&self) -> usize {
        self.config.view.page_size
    }

    /// The page actually on screen, after clamping.
    pub fn current_page(&self) -> usize {
        self.monitor.view(self.page, self.page_size()).page
    }

    fn last_page(&self) -> usize {
        self.monitor.view(self.page, self.page_size()).total_pages.max(1)
    }

    /// Apply one semantic event. Kept free of terminal I/O so it can be
    /// exercised directly.
    pub fn handle(&mut self, event: AppEvent) {
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::FilterBar {
            match event {
                AppEvent::Quit => self.quit = true,
                AppEvent::Enter | AppEvent::Escape => {
                    tracing::debug!(query = %self.filter.query, "focus: FilterBar -> Table");
                    self.focus = Focus::Table;
                }
                other => {
                    if self.filter.handle(&other) {
                        self.monitor.set_query(self.filter.query.clone());
                        self.page = 1;
                    }
                }
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::FilterFocus => {
                tracing::debug!("focus -> FilterBar");
                self.focus = Focus::FilterBar;
            }
            AppEvent::CycleStatus => {
                let next = self.monitor.config().status.next();
                tracing::debug!(status = %next, "status filter changed");
                self.monitor.set_status_filter(next);
                self.page = 1;
            }
            AppEvent::ClearFilters => {
                self.filter.clear();
                self.monitor.set_filter("", sigmon_core::StatusFilter::All);
                self.page = 1;
            }
            AppEvent::SortBy(field) => {
                self.monitor.set_sort(field);
                tracing::debug!(sort = ?self.monitor.config().sort, "sort changed");
                self.page = 1;
            }
            AppEvent::Nav(Direction::Left) => {
                self.page = self.current_page().saturating_sub(1).max(1);
            }
            AppEvent::Nav(Direction::Right) => {
                self.page = (self.current_page() + 1).min(self.last_page());
            }
            AppEvent::FirstPage => self.page = 1,
            AppEvent::LastPage => self.page = self.last_page(),
            AppEvent::Export(format) => self.export(format),
            AppEvent::Escape => self.message = None,
            // Terminal resize is handled automatically by ratatui
            _ => {}
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let result = self.monitor.export_to(
            &self.config.export.directory,
            format,
            &self.config.view.timestamp_format,
            Local::now().date_naive(),
        );
        let message = match result {
            Ok(path) => StatusMessage::Info(format!(
                "exported {} signals to {}",
                self.monitor.filtered().len(),
                path.display()
            )),
            Err(err) => {
                tracing::warn!(error = %err, %format, "export failed");
                StatusMessage::Error(format!("export failed: {err}"))
            }
        };
        self.message = Some((message, Instant::now()));
    }

    /// Pull every pending feed event into the monitor and expire stale
    /// status messages.
    pub fn tick(&mut self, rx: &mut mpsc::Receiver<FeedEvent>) {
        let ingested = sigmon_feeds::drain(rx, &mut self.monitor);
        if ingested > 0 {
            tracing::debug!(ingested, "feed events applied");
        }
        if let Some((_, at)) = &self.message {
            if at.elapsed() >= MESSAGE_TTL {
                self.message = None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    rx: mpsc::Receiver<FeedEvent>,
}

impl App {
    pub fn new(
        monitor: Monitor,
        rx: mpsc::Receiver<FeedEvent>,
        config: Config,
        theme: Theme,
    ) -> Self {
        Self {
            state: AppState::new(monitor, config, theme),
            rx,
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.tick(&mut self.rx);
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                let app_event = match self.state.focus {
                    Focus::FilterBar => event::to_app_event_insert(raw),
                    Focus::Table => event::to_app_event(raw),
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.state.handle(ev);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // header | filter bar | table | status line
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let monitor = &state.monitor;
    let stats = monitor.stats();
    let page = monitor.view(state.page, state.page_size());
    let focused = state.focus == Focus::FilterBar;

    frame.render_widget(Header::new(monitor.health(), &stats, &state.theme), vert[0]);
    let filter_bar = FilterBar::new(&state.filter, monitor.config().status, focused, &state.theme);
    if focused {
        let (cx, cy) = filter_bar.cursor_position(vert[1]);
        frame.set_cursor_position((cx, cy));
    }
    frame.render_widget(filter_bar, vert[1]);
    frame.render_widget(
        SignalTable::new(
            &page,
            monitor.config().sort,
            &state.config.view.timestamp_format,
            &state.theme,
        ),
        vert[2],
    );

    if let Some((message, _)) = &state.message {
        let line = match message {
            StatusMessage::Info(text) => Line::styled(text.as_str(), state.theme.message_info),
            StatusMessage::Error(text) => Line::styled(text.as_str(), state.theme.message_error),
        };
        frame.render_widget(Paragraph::new(line), vert[3]);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

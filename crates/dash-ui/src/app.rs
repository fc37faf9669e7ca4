//! Main application state and TUI event loop for the CloudSim dashboard.
//!
//! [`App`] owns the theme, the active tab, the search query, and the last
//! received dashboard update.  It drives the rendering and keyboard loop.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use dash_runtime::orchestrator::{DashboardData, RefreshHandle};

use crate::charts;
use crate::components::header::Header;
use crate::components::summary;
use crate::table_view;
use crate::themes::Theme;

// ── TabView ───────────────────────────────────────────────────────────────────

/// Which tab the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabView {
    /// Cloudlet table.
    Cloudlets,
    /// Host table.
    Hosts,
    /// VM table.
    Vms,
    /// The 2×2 chart grid.
    Charts,
}

impl TabView {
    /// Tab titles in display order.
    pub const TITLES: [&'static str; 4] = ["Cloudlets", "Hosts", "VMs", "Charts"];

    /// Index into [`TabView::TITLES`].
    pub fn index(&self) -> usize {
        match self {
            TabView::Cloudlets => 0,
            TabView::Hosts => 1,
            TabView::Vms => 2,
            TabView::Charts => 3,
        }
    }

    /// The next tab, wrapping around.
    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % 4)
    }

    /// The previous tab, wrapping around.
    pub fn prev(&self) -> Self {
        Self::from_index((self.index() + 3) % 4)
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => TabView::Cloudlets,
            1 => TabView::Hosts,
            2 => TabView::Vms,
            _ => TabView::Charts,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Currently selected tab.
    pub tab: TabView,
    /// Active search query filtering the table views.
    pub search: String,
    /// `true` while the user is typing into the search box.
    pub search_mode: bool,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Most recent dashboard update, `None` until the first data arrives.
    pub last_data: Option<DashboardData>,
}

impl App {
    /// Construct a new application with the given theme.
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            tab: TabView::Cloudlets,
            search: String::new(),
            search_mode: false,
            should_quit: false,
            last_data: None,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the dashboard TUI, receiving data from `rx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// that the terminal event loop stays on the current thread while data
    /// updates arrive on the async channel via `try_recv`.
    ///
    /// The loop exits on `q`, `Q`, or `Ctrl+C`.
    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<DashboardData>,
        refresh: &RefreshHandle,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break Ok(());
                    }
                    self.handle_key(key.code, refresh);
                }
            }

            // Drain any pending data updates (non-blocking).
            loop {
                match rx.try_recv() {
                    Ok(data) => self.last_data = Some(data),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply a key press to the application state.
    pub fn handle_key(&mut self, code: KeyCode, refresh: &RefreshHandle) {
        if self.search_mode {
            match code {
                KeyCode::Esc => {
                    self.search_mode = false;
                    self.search.clear();
                }
                KeyCode::Enter => self.search_mode = false,
                KeyCode::Backspace => {
                    self.search.pop();
                }
                KeyCode::Char(c) => self.search.push(c),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char('1') => self.tab = TabView::Cloudlets,
            KeyCode::Char('2') => self.tab = TabView::Hosts,
            KeyCode::Char('3') => self.tab = TabView::Vms,
            KeyCode::Char('4') => self.tab = TabView::Charts,
            KeyCode::Char('r') => refresh.request_refresh(),
            KeyCode::Char('/') => self.search_mode = true,
            KeyCode::Esc => self.search.clear(),
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let Some(data) = self.last_data.as_ref() else {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "Loading simulation results...",
                self.theme.dim,
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" CloudSim Dashboard "),
            );
            frame.render_widget(placeholder, area);
            return;
        };

        let Some(snapshot) = data.snapshot.as_ref() else {
            let error = data.last_error.as_deref().unwrap_or("unknown error");
            table_view::render_load_error(frame, area, error, &self.theme);
            return;
        };

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Length(4), // summary cards
                Constraint::Length(3), // tab bar
                Constraint::Min(5),    // body
                Constraint::Length(1), // footer
            ])
            .split(area);

        // Header.
        let source = data.source.display().to_string();
        let updated = format_updated(&snapshot.metadata.generated_at);
        let header = Header::new(&source, &updated, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), sections[0]);

        // Summary cards.
        summary::render_summary_cards(frame, sections[1], &snapshot.stats, &self.theme);

        // Tab bar.
        let tabs = Tabs::new(TabView::TITLES.map(Line::from).to_vec())
            .select(self.tab.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(tabs, sections[2]);

        // Body.
        if snapshot.collections.is_empty() {
            table_view::render_no_data(frame, sections[3], &self.theme);
        } else {
            match self.tab {
                TabView::Cloudlets => table_view::render_cloudlets(
                    frame,
                    sections[3],
                    &snapshot.collections.cloudlets,
                    &self.search,
                    &self.theme,
                ),
                TabView::Hosts => table_view::render_hosts(
                    frame,
                    sections[3],
                    &snapshot.collections.hosts,
                    &self.search,
                    &self.theme,
                ),
                TabView::Vms => table_view::render_vms(
                    frame,
                    sections[3],
                    &snapshot.collections.vms,
                    &self.search,
                    &self.theme,
                ),
                TabView::Charts => {
                    charts::render_charts(frame, sections[3], snapshot, &self.theme)
                }
            }
        }

        // Footer.
        frame.render_widget(self.footer_line(data), sections[4]);
    }

    /// The single footer line: search box while typing, key hints otherwise,
    /// with a stale-data warning appended when the last reload failed.
    fn footer_line(&self, data: &DashboardData) -> Paragraph<'_> {
        let mut spans = if self.search_mode {
            vec![
                Span::styled("/", self.theme.bold),
                Span::styled(self.search.clone(), self.theme.text),
                Span::styled("_", self.theme.dim),
            ]
        } else {
            vec![Span::styled(
                "q quit | Tab/1-4 views | / search | r refresh",
                self.theme.dim,
            )]
        };

        if let Some(error) = data.last_error.as_deref() {
            spans.push(Span::styled(
                format!("  (stale: {})", error),
                self.theme.warning,
            ));
        }

        Paragraph::new(Line::from(spans))
    }
}

/// Extract `HH:MM:SS` from an RFC 3339 timestamp, falling back to the raw
/// string when it does not parse.
fn format_updated(generated_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(generated_at)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| generated_at.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

//! Summary stat cards rendered above the tab bar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dash_runtime::data::stats::SummaryStats;

use crate::themes::Theme;

/// Render the four headline stat cards side by side.
///
/// Cards: total cloudlets, active/total hosts, total VMs, total energy.
pub fn render_summary_cards(frame: &mut Frame, area: Rect, stats: &SummaryStats, theme: &Theme) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(
        frame,
        cards[0],
        "Total Cloudlets",
        &stats.total_cloudlets.to_string(),
        theme,
    );
    render_card(
        frame,
        cards[1],
        "Active Hosts",
        &stats.hosts_display(),
        theme,
    );
    render_card(frame, cards[2], "Total VMs", &stats.total_vms.to_string(), theme);
    render_card(frame, cards[3], "Total Energy", &stats.energy_display(), theme);
}

/// A single bordered card with a dim label over a bold value.
fn render_card(frame: &mut Frame, area: Rect, label: &str, value: &str, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(label.to_string(), theme.label)),
        Line::from(Span::styled(value.to_string(), theme.value)),
    ];
    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(card, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

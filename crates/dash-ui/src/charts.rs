//! Chart grid for the dashboard TUI.
//!
//! Renders a 2×2 grid: cloudlet execution times, per-host energy consumption,
//! host CPU utilization, and VM allocation per host.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use dash_core::formatting;
use dash_core::models::{metric, EntityRecord};
use dash_runtime::data::analysis::DashboardSnapshot;
use dash_runtime::data::stats;

use crate::themes::Theme;

/// Render the full chart grid into `area`.
pub fn render_charts(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_execution_chart(frame, top[0], &snapshot.collections.cloudlets, theme);
    render_energy_chart(frame, top[1], &snapshot.collections.hosts, theme);
    render_cpu_chart(frame, bottom[0], &snapshot.collections.hosts, theme);
    render_allocation_chart(frame, bottom[1], &snapshot.collections.vms, theme);
}

// ── Individual charts ─────────────────────────────────────────────────────────

/// Bar chart of cloudlet execution times, one bar per cloudlet.
fn render_execution_chart(frame: &mut Frame, area: Rect, cloudlets: &[EntityRecord], theme: &Theme) {
    let bars = metric_bars(
        cloudlets,
        metric::EXECUTION_TIME,
        "C",
        theme.chart_execution,
    );
    render_bar_chart(frame, area, " Execution Time (s) ", bars, theme);
}

/// Bar chart of energy consumed per host.
fn render_energy_chart(frame: &mut Frame, area: Rect, hosts: &[EntityRecord], theme: &Theme) {
    let bars = metric_bars(hosts, metric::ENERGY_CONSUMED, "H", theme.chart_energy);
    render_bar_chart(frame, area, " Energy (Wh) ", bars, theme);
}

/// Line chart of CPU utilization per host, on a fixed 0–100 % scale.
fn render_cpu_chart(frame: &mut Frame, area: Rect, hosts: &[EntityRecord], theme: &Theme) {
    let points: Vec<(f64, f64)> = hosts
        .iter()
        .filter_map(|host| {
            host.metric_f64(metric::CPU_UTILIZATION)
                .map(|fraction| (host.id as f64, fraction * 100.0))
        })
        .collect();

    let max_x = points.last().map(|(x, _)| *x).unwrap_or(0.0).max(1.0);
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_cpu)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" CPU Utilization (%) "),
        )
        .x_axis(
            Axis::default()
                .title("Host")
                .style(theme.chart_axis)
                .bounds([0.0, max_x]),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"]),
        );
    frame.render_widget(chart, area);
}

/// Bar chart of VM counts per host, with an `Unallocated` bucket last.
fn render_allocation_chart(frame: &mut Frame, area: Rect, vms: &[EntityRecord], theme: &Theme) {
    let bars: Vec<Bar> = stats::vm_allocation(vms)
        .into_iter()
        .map(|(label, count)| {
            Bar::default()
                .label(label)
                .value(count as u64)
                .style(theme.chart_allocation)
        })
        .collect();
    render_bar_chart(frame, area, " VM Allocation ", bars, theme);
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// One bar per entity for a numeric metric.
///
/// Bar heights are the metric value scaled by 100 so fractional values still
/// produce visible bars; the printed value keeps the original scale.
fn metric_bars(
    records: &[EntityRecord],
    name: &str,
    label_prefix: &str,
    style: ratatui::style::Style,
) -> Vec<Bar<'static>> {
    records
        .iter()
        .filter_map(|record| {
            record.metric_f64(name).map(|value| {
                Bar::default()
                    .label(format!("{}{}", label_prefix, record.id))
                    .value((value * 100.0).round().max(0.0) as u64)
                    .text_value(formatting::format_number(value, 2))
                    .style(style)
            })
        })
        .collect()
}

fn render_bar_chart(frame: &mut Frame, area: Rect, title: &str, bars: Vec<Bar>, theme: &Theme) {
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        )
        .bar_width(7)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .style(theme.text);
    frame.render_widget(chart, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

//! Entity table views (cloudlets / hosts / VMs) for the dashboard TUI.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per entity,
//! filtered by the active search query.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use dash_core::formatting;
use dash_core::models::{metric, EntityRecord, UNALLOCATED_HOST};

use crate::themes::Theme;

// ── Cell builders ─────────────────────────────────────────────────────────────

/// Placeholder for a metric the summary never reported for this entity.
pub const MISSING_VALUE: &str = "N/A";

/// Display cells for one cloudlet row: ID, start, finish, execution, status.
pub fn cloudlet_cells(record: &EntityRecord) -> Vec<String> {
    vec![
        record.id.to_string(),
        numeric_cell(record, metric::START_TIME),
        numeric_cell(record, metric::FINISH_TIME),
        numeric_cell(record, metric::EXECUTION_TIME),
        record
            .metric(metric::STATUS)
            .filter(|s| !s.is_empty())
            .unwrap_or(MISSING_VALUE)
            .to_string(),
    ]
}

/// Display cells for one host row: ID, CPU %, energy, VM count.
pub fn host_cells(record: &EntityRecord) -> Vec<String> {
    let cpu = match record.metric_f64(metric::CPU_UTILIZATION) {
        Some(fraction) => formatting::format_utilization(fraction),
        None => raw_or_missing(record, metric::CPU_UTILIZATION),
    };
    let energy = match record.metric_f64(metric::ENERGY_CONSUMED) {
        Some(wh) => formatting::format_energy(wh),
        None => raw_or_missing(record, metric::ENERGY_CONSUMED),
    };
    vec![
        record.id.to_string(),
        cpu,
        energy,
        record
            .metric(metric::VMS_COUNT)
            .filter(|s| !s.is_empty())
            .unwrap_or(MISSING_VALUE)
            .to_string(),
    ]
}

/// Display cells for one VM row: ID and its placement.
pub fn vm_cells(record: &EntityRecord) -> Vec<String> {
    let placement = match record.metric(metric::HOST).filter(|s| !s.is_empty()) {
        Some(UNALLOCATED_HOST) => "Unallocated".to_string(),
        Some(host) => format!("Host {}", host),
        None => MISSING_VALUE.to_string(),
    };
    vec![record.id.to_string(), placement]
}

/// `true` when any cell contains `query` (case-insensitive). An empty query
/// matches everything.
pub fn row_matches(query: &str, cells: &[String]) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    cells.iter().any(|cell| cell.to_lowercase().contains(&needle))
}

/// Numeric metric formatted to two decimals; falls back to the raw string
/// when the value does not parse.
fn numeric_cell(record: &EntityRecord, name: &str) -> String {
    match record.metric_f64(name) {
        Some(value) => formatting::format_number(value, 2),
        None => raw_or_missing(record, name),
    }
}

fn raw_or_missing(record: &EntityRecord, name: &str) -> String {
    record
        .metric(name)
        .filter(|s| !s.is_empty())
        .unwrap_or(MISSING_VALUE)
        .to_string()
}

// ── Render functions ──────────────────────────────────────────────────────────

/// Render the cloudlet table into `area`, filtered by `query`.
pub fn render_cloudlets(
    frame: &mut Frame,
    area: Rect,
    records: &[EntityRecord],
    query: &str,
    theme: &Theme,
) {
    let rows: Vec<Row> = records
        .iter()
        .map(cloudlet_cells)
        .filter(|cells| row_matches(query, cells))
        .enumerate()
        .map(|(i, cells)| {
            let base = row_style(theme, i);
            let status_style = theme.status_style(&cells[4]);
            Row::new(vec![
                Cell::from(cells[0].clone()),
                Cell::from(cells[1].clone()),
                Cell::from(cells[2].clone()),
                Cell::from(cells[3].clone()),
                Cell::from(cells[4].clone()).style(status_style),
            ])
            .style(base)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(10),
    ];
    render_table(
        frame,
        area,
        "Cloudlets",
        &["ID", "Start", "Finish", "Execution Time", "Status"],
        rows,
        &widths,
        query,
        theme,
    );
}

/// Render the host table into `area`, filtered by `query`.
pub fn render_hosts(
    frame: &mut Frame,
    area: Rect,
    records: &[EntityRecord],
    query: &str,
    theme: &Theme,
) {
    let rows: Vec<Row> = records
        .iter()
        .map(|record| (record, host_cells(record)))
        .filter(|(_, cells)| row_matches(query, cells))
        .enumerate()
        .map(|(i, (record, cells))| {
            let base = row_style(theme, i);
            let cpu_pct = record
                .metric_f64(metric::CPU_UTILIZATION)
                .map(|f| f * 100.0)
                .unwrap_or(0.0);
            Row::new(vec![
                Cell::from(cells[0].clone()),
                Cell::from(cells[1].clone()).style(theme.utilization_style(cpu_pct)),
                Cell::from(cells[2].clone()),
                Cell::from(cells[3].clone()),
            ])
            .style(base)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(10),
    ];
    render_table(
        frame,
        area,
        "Hosts",
        &["ID", "CPU Utilization", "Energy", "VMs"],
        rows,
        &widths,
        query,
        theme,
    );
}

/// Render the VM table into `area`, filtered by `query`.
pub fn render_vms(
    frame: &mut Frame,
    area: Rect,
    records: &[EntityRecord],
    query: &str,
    theme: &Theme,
) {
    let rows: Vec<Row> = records
        .iter()
        .map(vm_cells)
        .filter(|cells| row_matches(query, cells))
        .enumerate()
        .map(|(i, cells)| {
            Row::new(cells.into_iter().map(Cell::from).collect::<Vec<_>>())
                .style(row_style(theme, i))
        })
        .collect();

    let widths = [Constraint::Length(6), Constraint::Length(16)];
    render_table(
        frame,
        area,
        "VMs",
        &["ID", "Placement"],
        rows,
        &widths,
        query,
        theme,
    );
}

/// Render a "no data" placeholder when the summary produced no entities.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No simulation results found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Run a simulation to populate the summary file.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" CloudSim Dashboard "),
        ),
        area,
    );
}

/// Render a load-error placeholder when no snapshot could ever be built.
pub fn render_load_error(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Failed to load simulation results", theme.error)),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), theme.dim)),
        Line::from(""),
        Line::from(Span::styled("Press 'r' to retry, 'q' to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" CloudSim Dashboard "),
        ),
        area,
    );
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn row_style(theme: &Theme, index: usize) -> ratatui::style::Style {
    if index % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

#[allow(clippy::too_many_arguments)]
fn render_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    headers: &[&str],
    rows: Vec<Row>,
    widths: &[Constraint],
    query: &str,
    theme: &Theme,
) {
    let header_cells = headers
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let title = if query.is_empty() {
        format!(" {} ", title)
    } else {
        format!(" {} (filter: {}) ", title, query)
    };

    let table = Table::new(rows, widths.to_vec())
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

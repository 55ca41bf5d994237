pub mod bars;
pub mod capacity;
pub mod cpu;
pub mod header;
pub mod help;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::metrics::Snapshot;
use crate::ui::bars::BarStyle;
use crate::ui::capacity::CapacityView;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        app.snapshot.as_ref(),
        app.color_mode,
        &app.theme,
        &app.cpu_history,
    );

    match &app.snapshot {
        Some(snapshot) => render_body(frame, chunks[1], app, snapshot),
        None => render_loading(frame, chunks[1], app),
    }

    statusbar::render(
        frame,
        chunks[2],
        app.input_mode,
        &app.keybinds,
        app.vertical,
        &app.theme,
    );

    // Help overlay is drawn last so it sits on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}

fn render_loading(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(Span::styled(
        "Loading system information...",
        Style::default().fg(app.theme.text_secondary),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let style = BarStyle {
        theme: &app.theme,
        mode: app.color_mode,
        compact: app.compact,
    };
    let section = capacity::section_height(&style);
    let error_rows = u16::from(app.last_error.is_some());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(error_rows),
            Constraint::Min(section),
            Constraint::Length(section),
            Constraint::Length(section),
        ])
        .split(area);

    if let Some(error) = &app.last_error {
        let line = Line::from(Span::styled(
            format!(" Error: {error}"),
            Style::default()
                .fg(app.theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), chunks[0]);
    }

    cpu::render(
        frame,
        chunks[1],
        snapshot,
        &style,
        app.vertical,
        app.show_threads,
    );
    capacity::render(
        frame,
        chunks[2],
        &CapacityView {
            title: "Memory (RAM)",
            bar_label: "Memory Usage",
            usage_percent: snapshot.memory_usage_percent,
            used_gb: snapshot.memory_used_gb,
            total_gb: snapshot.memory_total_gb,
        },
        &style,
    );
    capacity::render(
        frame,
        chunks[3],
        &CapacityView {
            title: "Disk (Root /)",
            bar_label: "Disk Usage",
            usage_percent: snapshot.disk_usage_percent,
            used_gb: snapshot.disk_used_gb,
            total_gb: snapshot.disk_total_gb,
        },
        &style,
    );
}

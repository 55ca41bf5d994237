use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph};

use crate::format::format_percent;
use crate::metrics::Snapshot;
use crate::ui::bars::{BarStyle, render_bar};

/// Thread bars per row in horizontal orientation.
pub const THREAD_COLUMNS: usize = 3;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    style: &BarStyle,
    vertical: bool,
    show_threads: bool,
) {
    let theme = style.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " CPU ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(style.height()),
            Constraint::Min(0),
        ])
        .split(inner);

    let summary = Line::from(vec![
        Span::styled("Average Usage: ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format_percent(snapshot.cpu_usage_average),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Threads: {}", snapshot.thread_count()),
            Style::default().fg(theme.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    render_bar(
        frame,
        chunks[1],
        "CPU Avg Usage",
        snapshot.cpu_usage_average,
        style,
    );

    if !show_threads || snapshot.cpu_usage_per_thread.is_empty() {
        return;
    }
    if vertical {
        render_thread_chart(frame, chunks[2], &snapshot.cpu_usage_per_thread, style);
    } else {
        render_thread_grid(frame, chunks[2], &snapshot.cpu_usage_per_thread, style);
    }
}

fn render_thread_grid(frame: &mut Frame, area: Rect, usage: &[f64], style: &BarStyle) {
    let row_height = style.height();
    for (row, values) in usage.chunks(THREAD_COLUMNS).enumerate() {
        let y = area.y + row as u16 * row_height;
        if y + row_height > area.bottom() {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, row_height);
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, THREAD_COLUMNS as u32); THREAD_COLUMNS])
            .split(row_area);

        for (column, value) in values.iter().enumerate() {
            let index = row * THREAD_COLUMNS + column;
            render_bar(frame, cells[column], &format!("T{index}"), *value, style);
        }
    }
}

fn render_thread_chart(frame: &mut Frame, area: Rect, usage: &[f64], style: &BarStyle) {
    let theme = style.theme;
    let bars: Vec<Bar> = usage
        .iter()
        .enumerate()
        .map(|(index, value)| {
            Bar::default()
                .value(value.round().clamp(0.0, 100.0) as u64)
                .text_value(format!("{value:.0}"))
                .label(Line::from(format!("T{index}")))
                .style(Style::default().fg(theme.usage_color(*value, style.mode)))
                .value_style(
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .max(100);
    frame.render_widget(chart, area);
}

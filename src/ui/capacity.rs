use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::{format_capacity, format_percent};
use crate::ui::bars::{BarStyle, render_bar};

/// A capacity-backed resource: RAM or the root filesystem.
pub struct CapacityView<'a> {
    pub title: &'a str,
    pub bar_label: &'a str,
    pub usage_percent: f64,
    pub used_gb: f64,
    pub total_gb: f64,
}

/// Rows needed by [`render`] for the given bar style.
pub fn section_height(style: &BarStyle) -> u16 {
    // borders + caption + bar
    2 + 1 + style.height()
}

pub fn render(frame: &mut Frame, area: Rect, view: &CapacityView, style: &BarStyle) {
    let theme = style.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" {} ", view.title),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(style.height())])
        .split(inner);

    let caption = Line::from(vec![
        Span::styled("Usage: ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format_percent(view.usage_percent),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format_capacity(view.used_gb, view.total_gb),
            Style::default().fg(theme.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(caption), chunks[0]);

    render_bar(frame, chunks[1], view.bar_label, view.usage_percent, style);
}

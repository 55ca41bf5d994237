use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge};

use crate::ui::theme::{BarColorMode, Theme};

/// How usage bars are drawn.
#[derive(Debug, Clone, Copy)]
pub struct BarStyle<'a> {
    pub theme: &'a Theme,
    pub mode: BarColorMode,
    pub compact: bool,
}

impl BarStyle<'_> {
    /// Rows taken by one bar: compact bars are a single row, full bars
    /// carry a bordered title.
    pub fn height(&self) -> u16 {
        if self.compact { 1 } else { 3 }
    }
}

pub fn percent_ratio(percent: f64) -> f64 {
    let ratio = percent / 100.0;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn render_bar(frame: &mut Frame, area: Rect, label: &str, percent: f64, style: &BarStyle) {
    let theme = style.theme;
    let color = theme.usage_color(percent, style.mode);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(theme.gauge_unfilled))
        .ratio(percent_ratio(percent));

    let gauge = if style.compact {
        gauge.label(Span::styled(
            format!("{label} {percent:.1}%"),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.overlay_border))
            .title(Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(theme.text_secondary)
                    .add_modifier(Modifier::BOLD),
            ));
        gauge.block(block).label(format!("{percent:.2}%"))
    };

    frame.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_clamped_and_finite() {
        assert_eq!(percent_ratio(50.0), 0.5);
        assert_eq!(percent_ratio(150.0), 1.0);
        assert_eq!(percent_ratio(-5.0), 0.0);
        assert_eq!(percent_ratio(f64::NAN), 0.0);
    }

    #[test]
    fn compact_bars_are_one_row() {
        let theme = Theme::dark();
        let mut style = BarStyle {
            theme: &theme,
            mode: BarColorMode::Multi,
            compact: true,
        };
        assert_eq!(style.height(), 1);
        style.compact = false;
        assert_eq!(style.height(), 3);
    }
}

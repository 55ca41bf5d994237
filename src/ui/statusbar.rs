use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, ResolvedKeybinds, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    keybinds: &ResolvedKeybinds,
    vertical: bool,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let mut spans = Vec::new();
    match input_mode {
        InputMode::Help => {
            spans.extend(pill_spans("Esc".to_string(), "Close help", theme));
        }
        InputMode::Normal => {
            let orientation = if vertical { "Horizontal" } else { "Vertical" };
            spans.extend(pill_spans(key_label(keybinds.quit), "Quit", theme));
            spans.extend(pill_spans(
                key_label(keybinds.toggle_orientation),
                orientation,
                theme,
            ));
            spans.extend(pill_spans(
                key_label(keybinds.toggle_compact),
                "Compact",
                theme,
            ));
            spans.extend(pill_spans(
                key_label(keybinds.cycle_color_mode),
                "Colors",
                theme,
            ));
            spans.extend(pill_spans(key_label(keybinds.cycle_theme), "Theme", theme));
            spans.extend(pill_spans(key_label(keybinds.help), "Help", theme));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: String, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}

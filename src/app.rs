use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::metrics::{ProbeFailure, Snapshot};
use crate::ui::theme::{BarColorMode, BarPalette, ColorSupport, Theme, resolve_color_support};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub toggle_orientation: KeyCode,
    pub toggle_compact: KeyCode,
    pub cycle_color_mode: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            toggle_orientation: parse_key(&kb.toggle_orientation).unwrap_or(KeyCode::Char('v')),
            toggle_compact: parse_key(&kb.toggle_compact).unwrap_or(KeyCode::Char('m')),
            cycle_color_mode: parse_key(&kb.cycle_color_mode).unwrap_or(KeyCode::Char('c')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.toggle_orientation), "Toggle orientation"),
            (key_label(self.toggle_compact), "Toggle compact bars"),
            (key_label(self.cycle_color_mode), "Cycle bar colors"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    /// Latest sample; `None` until the first collection completes.
    pub snapshot: Option<Snapshot>,
    /// Failure reported with the latest sample. The sample itself is still
    /// rendered.
    pub last_error: Option<ProbeFailure>,
    pub samples_received: u64,
    pub input_mode: InputMode,
    pub vertical: bool,
    pub compact: bool,
    pub show_threads: bool,
    pub color_mode: BarColorMode,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub cpu_history: VecDeque<u64>,
    cpu_history_capacity: usize,
    palette: BarPalette,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(config: Config) -> Self {
        let color_support = resolve_color_support(&config.general.color_support);
        let palette = BarPalette::from_config(&config.colors, &config.bars);
        let theme = Theme::from_config(&config.colors.theme, &palette, color_support);
        let color_mode = BarColorMode::from_str_config(&config.bars.color_mode);
        let sparkline_length = config.general.sparkline_length.max(1);

        App {
            running: true,
            snapshot: None,
            last_error: None,
            samples_received: 0,
            input_mode: InputMode::Normal,
            vertical: config.general.vertical_mode,
            compact: config.bars.compact_mode,
            show_threads: config.general.show_threads,
            color_mode,
            theme,
            color_support,
            cpu_history: VecDeque::with_capacity(sparkline_length),
            cpu_history_capacity: sparkline_length,
            palette,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        }
    }

    /// Replaces the displayed sample. A failed probe does not discard the
    /// rest of the sample.
    pub fn apply_sample(&mut self, snapshot: Snapshot, error: Option<ProbeFailure>) {
        // Sparkline data is stored in hundredths of a percent.
        let cpu_val = (snapshot.cpu_usage_average * 100.0) as u64;
        if self.cpu_history.len() == self.cpu_history_capacity {
            self.cpu_history.pop_front();
        }
        self.cpu_history.push_back(cpu_val);

        self.snapshot = Some(snapshot);
        self.last_error = error;
        self.samples_received += 1;
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let kb = &self.keybinds;
        match key.code {
            code if code == kb.quit => Action::Quit,
            code if code == kb.toggle_orientation => Action::ToggleOrientation,
            code if code == kb.toggle_compact => Action::ToggleCompact,
            code if code == kb.cycle_color_mode => Action::CycleColorMode,
            code if code == kb.cycle_theme => Action::CycleTheme,
            code if code == kb.help => Action::ToggleHelp,
            _ => Action::None,
        }
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::ToggleHelp,
            code if code == self.keybinds.help => Action::ToggleHelp,
            code if code == self.keybinds.quit => Action::Quit,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleOrientation => self.vertical = !self.vertical,
            Action::ToggleCompact => self.compact = !self.compact,
            Action::CycleColorMode => self.color_mode = self.color_mode.next(),
            Action::CycleTheme => {
                self.theme = self.theme.next(&self.palette, self.color_support);
            }
            Action::ToggleHelp => {
                self.input_mode = match self.input_mode {
                    InputMode::Help => InputMode::Normal,
                    InputMode::Normal => InputMode::Help,
                };
            }
            Action::None => {}
        }
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{ProbeFailure, SourceError};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample(avg: f64) -> Snapshot {
        Snapshot {
            cpu_usage_per_thread: vec![avg; 4],
            cpu_usage_average: avg,
            ..Snapshot::default()
        }
    }

    #[test]
    fn starts_without_a_sample() {
        let app = App::new(Config::default());
        assert!(app.running);
        assert!(app.snapshot.is_none());
        assert!(app.last_error.is_none());
        assert!(app.compact);
        assert!(!app.vertical);
        assert_eq!(app.color_mode, BarColorMode::Multi);
    }

    #[test]
    fn apply_sample_keeps_partial_data_alongside_error() {
        let mut app = App::new(Config::default());
        let failure = ProbeFailure::disk(SourceError::unavailable("statfs failed"));
        app.apply_sample(sample(42.0), Some(failure.clone()));

        assert_eq!(app.snapshot.as_ref().unwrap().cpu_usage_average, 42.0);
        assert_eq!(app.last_error, Some(failure));

        app.apply_sample(sample(10.0), None);
        assert!(app.last_error.is_none());
        assert_eq!(app.samples_received, 2);
    }

    #[test]
    fn cpu_history_is_bounded() {
        let mut config = Config::default();
        config.general.sparkline_length = 3;
        let mut app = App::new(config);
        for avg in [1.0, 2.0, 3.0, 4.0, 5.0] {
            app.apply_sample(sample(avg), None);
        }
        assert_eq!(app.cpu_history, VecDeque::from(vec![300, 400, 500]));
    }

    #[test]
    fn default_keybinds_dispatch_toggles() {
        let mut app = App::new(Config::default());

        let action = app.map_key(key(KeyCode::Char('v')));
        assert_eq!(action, Action::ToggleOrientation);
        app.dispatch(action);
        assert!(app.vertical);

        app.dispatch(app.map_key(key(KeyCode::Char('m'))));
        assert!(!app.compact);

        app.dispatch(app.map_key(key(KeyCode::Char('c'))));
        assert_eq!(app.color_mode, BarColorMode::Single);

        let before = app.theme.name;
        app.dispatch(app.map_key(key(KeyCode::Char('t'))));
        assert_ne!(app.theme.name, before);

        app.dispatch(app.map_key(key(KeyCode::Char('q'))));
        assert!(!app.running);
    }

    #[test]
    fn multibyte_bar_colors_fall_back_to_theme() {
        let mut config = Config::default();
        config.general.color_support = "truecolor".to_string();
        config.bars.bar_color = Some("#aééb".to_string());
        config.colors.usage_mid = Some("ééé".to_string());
        let app = App::new(config);

        assert_eq!(app.theme.single_bar, Theme::dark().single_bar);
        assert_eq!(app.theme.usage_colors, Theme::dark().usage_colors);
    }

    #[test]
    fn custom_keybind_remap_works() {
        let mut config = Config::default();
        config.keybinds.quit = "x".to_string();
        let app = App::new(config);

        assert_eq!(app.map_key(key(KeyCode::Char('x'))), Action::Quit);
        assert_eq!(app.map_key(key(KeyCode::Char('q'))), Action::None);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::ToggleHelp);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(ctrl_c), Action::Quit);
    }

    #[test]
    fn help_mode_blocks_other_keys() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help());

        assert_eq!(app.map_key(key(KeyCode::Char('v'))), Action::None);
        assert_eq!(app.map_key(key(KeyCode::Esc)), Action::ToggleHelp);

        app.dispatch(Action::ToggleHelp);
        assert!(!app.show_help());
    }
}

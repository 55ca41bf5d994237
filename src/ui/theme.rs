use ratatui::style::Color;

use crate::config::{BarsConfig, ColorsConfig};

/// Percentage below which a bar is drawn in the "low" color.
pub const USAGE_MID_THRESHOLD: f64 = 50.0;
/// Percentage from which a bar is drawn in the "high" color.
pub const USAGE_HIGH_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColorMode {
    /// Every bar uses the configured bar color.
    Single,
    /// Bars are colored by usage band.
    Multi,
}

impl BarColorMode {
    pub fn next(self) -> Self {
        match self {
            BarColorMode::Single => BarColorMode::Multi,
            BarColorMode::Multi => BarColorMode::Single,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BarColorMode::Single => "Single",
            BarColorMode::Multi => "Multi",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "single" => BarColorMode::Single,
            _ => BarColorMode::Multi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

/// User-configured bar colors, kept as strings until a theme is built.
/// `None` keeps the active theme's color.
#[derive(Debug, Clone, Default)]
pub struct BarPalette {
    pub low: Option<String>,
    pub mid: Option<String>,
    pub high: Option<String>,
    pub single: Option<String>,
}

impl BarPalette {
    pub fn from_config(colors: &ColorsConfig, bars: &BarsConfig) -> Self {
        Self {
            low: colors.usage_low.clone(),
            mid: colors.usage_mid.clone(),
            high: colors.usage_high.clone(),
            single: bars.bar_color.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_unfilled: Color,
    pub sparkline_color: Color,
    /// Low, mid and high usage band colors.
    pub usage_colors: [Color; 3],
    pub single_bar: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str, palette: &BarPalette, support: ColorSupport) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "colorblind" => Self::colorblind(),
            "vivid" => Self::vivid(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        } else {
            theme.apply_palette(palette);
        }

        theme.apply_color_support(support);
        theme
    }

    pub fn next(&self, palette: &BarPalette, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Self::mono();
        }
        let next_name = match self.name {
            "dark" => "vivid",
            "vivid" => "light",
            "light" => "colorblind",
            _ => "dark",
        };
        Theme::from_config(next_name, palette, support)
    }

    /// Color for a bar at `percent`.
    pub fn usage_color(&self, percent: f64, mode: BarColorMode) -> Color {
        match mode {
            BarColorMode::Single => self.single_bar,
            BarColorMode::Multi if percent < USAGE_MID_THRESHOLD => self.usage_colors[0],
            BarColorMode::Multi if percent < USAGE_HIGH_THRESHOLD => self.usage_colors[1],
            BarColorMode::Multi => self.usage_colors[2],
        }
    }

    fn apply_palette(&mut self, palette: &BarPalette) {
        let overrides = [&palette.low, &palette.mid, &palette.high];
        for (slot, configured) in self.usage_colors.iter_mut().zip(overrides) {
            if let Some(color) = configured.as_deref().and_then(configured_color) {
                *slot = color;
            }
        }
        if let Some(single) = palette.single.as_deref().and_then(configured_color) {
            self.single_bar = single;
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.header_accent_bg = map(self.header_accent_bg);
        self.header_accent_fg = map(self.header_accent_fg);
        self.status_err = map(self.status_err);
        self.statusbar_bg = map(self.statusbar_bg);
        self.overlay_border = map(self.overlay_border);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.accent = map(self.accent);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.gauge_unfilled = map(self.gauge_unfilled);
        self.sparkline_color = map(self.sparkline_color);
        self.single_bar = map(self.single_bar);

        self.usage_colors = self.usage_colors.map(map);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::Green,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_unfilled: Color::Rgb(68, 68, 68),
            sparkline_color: Color::Rgb(251, 146, 60),
            usage_colors: [
                Color::Rgb(11, 197, 104),
                Color::Rgb(245, 166, 35),
                Color::Rgb(231, 76, 60),
            ],
            single_bar: Color::Rgb(11, 197, 104),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            accent: Color::Blue,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            sparkline_color: Color::Rgb(70, 130, 180),
            usage_colors: [
                Color::Rgb(60, 160, 60),
                Color::Rgb(220, 150, 30),
                Color::Rgb(200, 60, 60),
            ],
            single_bar: Color::Rgb(70, 130, 180),
        }
    }

    pub fn colorblind() -> Self {
        Theme {
            name: "colorblind",
            header_accent_bg: Color::Rgb(0, 114, 178),
            header_accent_fg: Color::White,
            status_err: Color::Rgb(213, 94, 0),
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::Rgb(86, 180, 233),
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::Rgb(86, 180, 233),
            pill_key_bg: Color::Rgb(230, 159, 0),
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_unfilled: Color::DarkGray,
            sparkline_color: Color::Rgb(86, 180, 233),
            usage_colors: [
                Color::Rgb(0, 114, 178),
                Color::Rgb(230, 159, 0),
                Color::Rgb(213, 94, 0),
            ],
            single_bar: Color::Rgb(0, 158, 115),
        }
    }

    pub fn vivid() -> Self {
        Theme {
            name: "vivid",
            header_accent_bg: Color::Rgb(203, 166, 247),
            header_accent_fg: Color::Rgb(30, 30, 46),
            status_err: Color::Rgb(243, 139, 168),
            statusbar_bg: Color::Rgb(49, 50, 68),
            overlay_border: Color::Rgb(69, 71, 90),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            accent: Color::Rgb(203, 166, 247),
            pill_key_bg: Color::Rgb(203, 166, 247),
            pill_key_fg: Color::Rgb(30, 30, 46),
            pill_desc_fg: Color::Rgb(205, 214, 244),
            surface_bg: Color::Rgb(49, 50, 68),
            gauge_unfilled: Color::Rgb(69, 71, 90),
            sparkline_color: Color::Rgb(251, 146, 60),
            usage_colors: [
                Color::Rgb(166, 227, 161),
                Color::Rgb(249, 226, 175),
                Color::Rgb(243, 139, 168),
            ],
            single_bar: Color::Rgb(125, 211, 252),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::Black,
            header_accent_fg: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::White,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            gauge_unfilled: Color::Black,
            sparkline_color: Color::White,
            usage_colors: [Color::Gray, Color::White, Color::White],
            single_bar: Color::White,
        }
    }
}

fn configured_color(value: &str) -> Option<Color> {
    let color = parse_hex_color(value);
    if color.is_none() {
        tracing::warn!(value, "ignoring invalid color, expected #rrggbb");
    }
    color
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> BarPalette {
        BarPalette::from_config(&ColorsConfig::default(), &BarsConfig::default())
    }

    #[test]
    fn bar_color_mode_cycles_and_parses() {
        assert_eq!(BarColorMode::Multi.next(), BarColorMode::Single);
        assert_eq!(BarColorMode::Single.next(), BarColorMode::Multi);
        assert_eq!(BarColorMode::from_str_config("SINGLE"), BarColorMode::Single);
        assert_eq!(BarColorMode::from_str_config("anything"), BarColorMode::Multi);
        assert_eq!(BarColorMode::Single.label(), "Single");
    }

    #[test]
    fn usage_bands_follow_thresholds() {
        let theme = Theme::from_config("dark", &palette(), ColorSupport::Truecolor);
        let [low, mid, high] = theme.usage_colors;

        assert_eq!(theme.usage_color(0.0, BarColorMode::Multi), low);
        assert_eq!(theme.usage_color(49.99, BarColorMode::Multi), low);
        assert_eq!(theme.usage_color(50.0, BarColorMode::Multi), mid);
        assert_eq!(theme.usage_color(79.99, BarColorMode::Multi), mid);
        assert_eq!(theme.usage_color(80.0, BarColorMode::Multi), high);
        assert_eq!(theme.usage_color(100.0, BarColorMode::Multi), high);
    }

    #[test]
    fn single_mode_uses_configured_bar_color() {
        let mut palette = palette();
        palette.single = Some("#3366ff".to_string());
        let theme = Theme::from_config("dark", &palette, ColorSupport::Truecolor);

        assert_eq!(
            theme.usage_color(95.0, BarColorMode::Single),
            Color::Rgb(0x33, 0x66, 0xff)
        );
    }

    #[test]
    fn invalid_palette_keeps_theme_defaults() {
        let mut palette = palette();
        palette.mid = Some("not-a-color".to_string());
        let theme = Theme::from_config("light", &palette, ColorSupport::Truecolor);
        assert_eq!(theme.usage_colors, Theme::light().usage_colors);
    }

    #[test]
    fn multibyte_colors_are_rejected_without_panicking() {
        let palette = BarPalette {
            low: Some("#aééb".to_string()),
            single: Some("#aééb".to_string()),
            ..BarPalette::default()
        };
        let theme = Theme::from_config("dark", &palette, ColorSupport::Truecolor);

        assert_eq!(theme.usage_colors, Theme::dark().usage_colors);
        assert_eq!(theme.single_bar, Theme::dark().single_bar);
    }

    #[test]
    fn cycling_themes_changes_bar_colors_when_unconfigured() {
        let support = ColorSupport::Truecolor;
        let dark = Theme::from_config("dark", &palette(), support);
        let vivid = dark.next(&palette(), support);

        assert_eq!(vivid.usage_colors, Theme::vivid().usage_colors);
        assert_ne!(vivid.usage_colors, dark.usage_colors);
        assert_ne!(vivid.single_bar, dark.single_bar);
    }

    #[test]
    fn configured_band_overrides_every_theme() {
        let palette = BarPalette {
            high: Some("#ff0000".to_string()),
            ..BarPalette::default()
        };
        let support = ColorSupport::Truecolor;
        let mut theme = Theme::from_config("dark", &palette, support);
        for _ in 0..4 {
            assert_eq!(theme.usage_colors[2], Color::Rgb(255, 0, 0));
            theme = theme.next(&palette, support);
        }
        assert_eq!(theme.usage_colors[0], Theme::dark().usage_colors[0]);
    }

    #[test]
    fn mono_support_forces_mono_theme() {
        let theme = Theme::from_config("vivid", &palette(), ColorSupport::Mono);
        assert_eq!(theme.name, "mono");
        assert_eq!(theme.next(&palette(), ColorSupport::Mono).name, "mono");
    }

    #[test]
    fn theme_cycle_returns_to_dark() {
        let support = ColorSupport::Truecolor;
        let mut theme = Theme::from_config("dark", &palette(), support);
        for expected in ["vivid", "light", "colorblind", "dark"] {
            theme = theme.next(&palette(), support);
            assert_eq!(theme.name, expected);
        }
    }

    #[test]
    fn color256_maps_rgb_to_indexed() {
        let theme = Theme::from_config("dark", &palette(), ColorSupport::Color256);
        assert!(matches!(theme.usage_colors[0], Color::Indexed(_)));
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_color("#0bc568"), Some(Color::Rgb(11, 197, 104)));
        assert_eq!(parse_hex_color("0bc568"), Some(Color::Rgb(11, 197, 104)));
        assert_eq!(parse_hex_color("#fff"), None);
        // Six bytes, but not six characters.
        assert_eq!(parse_hex_color("#aééb"), None);
        assert_eq!(parse_hex_color("ééé"), None);
    }
}

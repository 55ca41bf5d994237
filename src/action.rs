#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    ToggleOrientation,
    ToggleCompact,
    CycleColorMode,
    CycleTheme,
    ToggleHelp,
    None,
}

/// Shell-level commands produced by the keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectPrev,
    SelectNext,
    PageUp,
    PageDown,
    /// Open the selected result.
    Activate,
    /// Pick the n-th entry of the options menu (0-based).
    Menu(usize),
    About,
    Back,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
}

impl Command {
    pub fn id(self) -> &'static str {
        match self {
            Self::SelectPrev => "select-prev",
            Self::SelectNext => "select-next",
            Self::PageUp => "page-up",
            Self::PageDown => "page-down",
            Self::Activate => "activate",
            Self::Menu(_) => "menu",
            Self::About => "about",
            Self::Back => "back",
            Self::Quit => "quit",
        }
    }
}

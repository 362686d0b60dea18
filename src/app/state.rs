use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Article,
    About,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_command: Option<Command>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub status: StatusState,
    pub quit_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::Search,
            status: StatusState::default(),
            quit_requested: false,
        }
    }
}

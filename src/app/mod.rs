mod core;
mod event_bus;
mod event_loop;
mod input_ops;
mod nav;
mod probe;
mod screen;
mod state;
pub(crate) mod terminal_session;
mod view_ops;

#[cfg(test)]
mod tests;

pub use core::{APP_TITLE, App};
pub use probe::{TerminalColorProbe, capability_for};
pub use screen::{ArticleScreen, ScreenSink, SearchScreen};
pub use state::{AppState, Mode, StatusState};

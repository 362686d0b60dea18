pub mod controller;
pub mod engine;
pub mod results;
pub mod session;

pub use controller::{ControllerState, SearchController};
pub use engine::{EngineOptions, FilterEngine, FilterEvent, FilterService, FilterTicket, SessionId};
pub use results::ResultList;
pub use session::SearchSession;

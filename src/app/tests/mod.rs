
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::capability::ActionCapability;
use crate::config::Config;
use crate::dictionary::{DictionaryFilter, MemoryDictionary};
use crate::error::AppResult;
use crate::model::LanguageCode;
use crate::search::{FilterEvent, FilterService, FilterTicket, SessionId};

use super::core::App;

/// Filters on the calling thread and queues the completion for the next drain.
pub(super) struct InlineFilter {
    dictionary: Arc<MemoryDictionary>,
    next_session: SessionId,
    next_generation: u64,
    events: Vec<FilterEvent>,
    closed: Rc<RefCell<Vec<SessionId>>>,
}

impl FilterService for InlineFilter {
    fn open_session(&mut self) -> SessionId {
        self.next_session += 1;
        self.next_session
    }

    fn submit(
        &mut self,
        session: SessionId,
        language: &LanguageCode,
        query: &str,
    ) -> AppResult<FilterTicket> {
        self.next_generation += 1;
        let ticket = FilterTicket {
            session,
            generation: self.next_generation,
        };
        let event = match self.dictionary.filter(language, query) {
            Ok(results) => FilterEvent::Completed {
                ticket,
                results: results.into(),
            },
            Err(err) => FilterEvent::Failed {
                ticket,
                message: err.to_string(),
            },
        };
        self.events.push(event);
        Ok(ticket)
    }

    fn close_session(&mut self, session: SessionId) {
        self.events.retain(|event| event.ticket().session != session);
        self.closed.borrow_mut().push(session);
    }

    fn drain_events(&mut self) -> Vec<FilterEvent> {
        std::mem::take(&mut self.events)
    }
}

pub(super) struct Harness {
    pub app: App,
    pub closed: Rc<RefCell<Vec<SessionId>>>,
}

pub(super) fn harness(language: &str, query: Option<&str>) -> Harness {
    let dictionary = Arc::new(MemoryDictionary::sample().expect("sample dictionary should load"));
    let closed = Rc::new(RefCell::new(Vec::new()));
    let filter = InlineFilter {
        dictionary: Arc::clone(&dictionary),
        next_session: 0,
        next_generation: 0,
        events: Vec::new(),
        closed: Rc::clone(&closed),
    };
    let app = App::new(
        Config::default(),
        dictionary,
        Box::new(filter),
        Arc::new(ActionCapability::fixed(true)),
        Some(LanguageCode::new(language)),
        query,
    )
    .expect("app should open");
    Harness { app, closed }
}

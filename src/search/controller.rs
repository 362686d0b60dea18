use std::sync::Arc;

use crate::capability::ActionCapability;
use crate::catalog::LanguageCatalog;
use crate::error::{AppError, AppResult};
use crate::menu::{MenuAction, build_language_menu};
use crate::model::{LanguageCode, MenuEntry, SearchResult};
use crate::navigation::{DisplaySink, NavigationRequest};

use super::engine::{FilterEvent, FilterService};
use super::session::SearchSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Opened without a language: a static screen that never filters.
    Idle,
    Active,
}

/// Drives one search screen: text edits in, ranked results and navigation
/// requests out.
#[derive(Debug)]
pub struct SearchController {
    session: Option<SearchSession>,
    opened: bool,
    capability: Arc<ActionCapability>,
    menu_max_languages: usize,
}

impl SearchController {
    pub fn new(capability: Arc<ActionCapability>, menu_max_languages: usize) -> Self {
        Self {
            session: None,
            opened: false,
            capability,
            menu_max_languages,
        }
    }

    pub fn state(&self) -> ControllerState {
        if self.session.is_some() {
            ControllerState::Active
        } else {
            ControllerState::Idle
        }
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn language(&self) -> Option<&LanguageCode> {
        self.session.as_ref().map(SearchSession::language)
    }

    pub fn results(&self) -> &[SearchResult] {
        self.session
            .as_ref()
            .map(|session| session.results().as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self) -> usize {
        self.results().len()
    }

    pub fn title(&self, base: &str) -> String {
        match self.language() {
            Some(language) => format!("{base} [{language}]"),
            None => base.to_string(),
        }
    }

    pub fn on_screen_opened(
        &mut self,
        language: Option<LanguageCode>,
        initial_query: Option<&str>,
        filter: &mut dyn FilterService,
        display: &mut dyn DisplaySink,
    ) -> AppResult<()> {
        if self.opened {
            return Err(AppError::invariant("search screen opened twice"));
        }
        self.opened = true;

        if let Some(language) = language {
            let session = SearchSession::new(filter.open_session(), language);
            tracing::info!(
                session = session.id(),
                language = %session.language(),
                "search session started"
            );
            self.session = Some(session);
        }

        if let Some(query) = initial_query {
            display.set_field_text(query);
            self.on_query_changed(query, filter);
        }
        Ok(())
    }

    /// Called for every edit of the text field, including programmatic ones.
    pub fn on_query_changed(&mut self, new_text: &str, filter: &mut dyn FilterService) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.query == new_text {
            return;
        }
        session.query = new_text.to_string();

        if new_text.is_empty() {
            session.pending = None;
            session.last_error = None;
            session.results.clear();
            return;
        }

        match filter.submit(session.id(), session.language(), new_text) {
            Ok(ticket) => {
                tracing::trace!(
                    session = ticket.session,
                    generation = ticket.generation,
                    "filter submitted"
                );
                session.pending = Some(ticket);
            }
            Err(err) => {
                tracing::warn!(%err, "filter submission failed");
                session.pending = None;
                session.last_error = Some(err.to_string());
                session.results.clear();
            }
        }
    }

    /// Applies one completion. Returns true when the visible results changed.
    pub fn apply_event(&mut self, event: FilterEvent) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let ticket = event.ticket();
        if ticket.session != session.id() || session.pending != Some(ticket) {
            tracing::trace!(
                session = ticket.session,
                generation = ticket.generation,
                "stale filter completion dropped"
            );
            return false;
        }
        session.pending = None;

        match event {
            FilterEvent::Completed { results, .. } => {
                session.last_error = None;
                session.results.replace_results(results);
            }
            FilterEvent::Failed { message, .. } => {
                tracing::warn!(%message, query = %session.query, "filter failed");
                session.last_error = Some(message);
                session.results.clear();
            }
        }
        true
    }

    /// True once per change of the result list since the previous call.
    pub fn take_results_changed(&mut self) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.results_mut().take_changed())
    }

    pub fn on_background(&mut self, filter: &mut dyn FilterService) -> bool {
        let mut changed = false;
        for event in filter.drain_events() {
            changed |= self.apply_event(event);
        }
        changed
    }

    pub fn on_result_activated(
        &self,
        index: usize,
        display: &mut dyn DisplaySink,
    ) -> AppResult<()> {
        let Some(session) = self.session.as_ref() else {
            return Err(AppError::invariant(
                "result activated without an active search session",
            ));
        };
        let Some(result) = session.results().get(index) else {
            return Err(AppError::invariant(format!(
                "result index {index} out of range (count {})",
                session.results().count()
            )));
        };

        tracing::debug!(
            article = result.article.0,
            mark = result.mark.0,
            "opening article"
        );
        display.navigate(NavigationRequest::OpenArticle {
            article: result.article,
            mark: result.mark,
        });
        Ok(())
    }

    pub fn on_screen_resumed(&self, display: &mut dyn DisplaySink) {
        display.focus_field();
        display.request_soft_input();
    }

    pub fn build_language_menu(&self, catalog: &dyn LanguageCatalog) -> Vec<MenuEntry> {
        build_language_menu(
            catalog,
            self.language(),
            self.menu_max_languages,
            self.capability.is_supported(),
        )
    }

    pub fn on_menu_action_selected(&self, action: &MenuAction, display: &mut dyn DisplaySink) {
        let request = match action {
            MenuAction::Language(entry) => NavigationRequest::OpenSearch {
                language: entry.target_language.clone(),
                search_term: Some(display.field_text()),
            },
            MenuAction::Shell(action) => NavigationRequest::Shell(*action),
        };
        display.navigate(request);
    }

    /// Tears the session down; later completions for it are ignored.
    pub fn on_screen_closed(&mut self, filter: &mut dyn FilterService) {
        if let Some(session) = self.session.take() {
            tracing::info!(session = session.id(), "search session closed");
            filter.close_session(session.id());
        }
    }

    pub fn status_segment(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        if let Some(error) = session.last_error() {
            return Some(format!("error: {error}"));
        }
        if session.is_filtering() {
            return Some("searching...".to_string());
        }
        if session.query().is_empty() {
            return None;
        }
        Some(match session.results().count() {
            0 => "no matches".to_string(),
            1 => "1 match".to_string(),
            count => format!("{count} matches"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::capability::ActionCapability;
    use crate::catalog::StaticCatalog;
    use crate::error::{AppError, AppResult};
    use crate::menu::MenuAction;
    use crate::model::{ArticleId, LanguageCode, MarkId, MenuEntry, SearchResult};
    use crate::navigation::{DisplaySink, NavigationRequest, ShellAction};
    use crate::search::engine::{FilterEvent, FilterService, FilterTicket, SessionId};

    use super::{ControllerState, SearchController};

    #[derive(Default)]
    struct ManualFilter {
        next_session: SessionId,
        next_generation: u64,
        submitted: Vec<(FilterTicket, LanguageCode, String)>,
        closed: Vec<SessionId>,
        queued: Vec<FilterEvent>,
        fail_submit: bool,
    }

    impl ManualFilter {
        fn ticket_for(&self, query: &str) -> FilterTicket {
            self.submitted
                .iter()
                .rev()
                .find(|(_, _, submitted)| submitted == query)
                .map(|(ticket, _, _)| *ticket)
                .expect("query should have been submitted")
        }

        fn complete(&self, query: &str, results: Vec<SearchResult>) -> FilterEvent {
            FilterEvent::Completed {
                ticket: self.ticket_for(query),
                results: results.into(),
            }
        }
    }

    impl FilterService for ManualFilter {
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
            if self.fail_submit {
                return Err(AppError::unsupported("filter worker is not available"));
            }
            self.next_generation += 1;
            let ticket = FilterTicket {
                session,
                generation: self.next_generation,
            };
            self.submitted
                .push((ticket, language.clone(), query.to_string()));
            Ok(ticket)
        }

        fn close_session(&mut self, session: SessionId) {
            self.closed.push(session);
        }

        fn drain_events(&mut self) -> Vec<FilterEvent> {
            std::mem::take(&mut self.queued)
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        field: String,
        navigations: Vec<NavigationRequest>,
        focus_calls: usize,
        soft_input_calls: usize,
    }

    impl DisplaySink for RecordingDisplay {
        fn navigate(&mut self, request: NavigationRequest) {
            self.navigations.push(request);
        }

        fn set_field_text(&mut self, text: &str) {
            self.field = text.to_string();
        }

        fn field_text(&self) -> String {
            self.field.clone()
        }

        fn focus_field(&mut self) {
            self.focus_calls += 1;
        }

        fn request_soft_input(&mut self) {
            self.soft_input_calls += 1;
        }
    }

    fn result(article: u32, mark: u32) -> SearchResult {
        SearchResult::new(ArticleId(article), MarkId(mark))
    }

    fn controller() -> SearchController {
        SearchController::new(Arc::new(ActionCapability::fixed(false)), 3)
    }

    fn active(language: &str) -> (SearchController, ManualFilter, RecordingDisplay) {
        let mut controller = controller();
        let mut filter = ManualFilter::default();
        let mut display = RecordingDisplay::default();
        controller
            .on_screen_opened(
                Some(LanguageCode::from(language)),
                None,
                &mut filter,
                &mut display,
            )
            .expect("screen should open");
        (controller, filter, display)
    }

    fn type_text(controller: &mut SearchController, filter: &mut ManualFilter, text: &str) {
        let mut typed = String::new();
        for ch in text.chars() {
            typed.push(ch);
            controller.on_query_changed(&typed, filter);
        }
    }

    #[test]
    fn opening_without_language_stays_idle_and_never_filters() {
        let mut controller = controller();
        let mut filter = ManualFilter::default();
        let mut display = RecordingDisplay::default();

        controller
            .on_screen_opened(None, Some("tag"), &mut filter, &mut display)
            .expect("screen should open");
        controller.on_query_changed("tago", &mut filter);

        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(display.field, "tag");
        assert!(filter.submitted.is_empty());
        assert_eq!(controller.count(), 0);
        assert_eq!(controller.title("PReVo"), "PReVo");
    }

    #[test]
    fn initial_query_seeds_field_and_runs_one_filter_pass() {
        let mut controller = controller();
        let mut filter = ManualFilter::default();
        let mut display = RecordingDisplay::default();

        controller
            .on_screen_opened(
                Some(LanguageCode::from("eo")),
                Some("tag"),
                &mut filter,
                &mut display,
            )
            .expect("screen should open");

        assert_eq!(controller.state(), ControllerState::Active);
        assert_eq!(display.field, "tag");
        assert_eq!(filter.submitted.len(), 1);
        assert_eq!(filter.submitted[0].1, LanguageCode::from("eo"));
        assert_eq!(filter.submitted[0].2, "tag");
        assert_eq!(controller.title("PReVo"), "PReVo [eo]");
    }

    #[test]
    fn opening_twice_is_an_invariant_violation() {
        let (mut controller, mut filter, mut display) = active("eo");
        let err = controller
            .on_screen_opened(
                Some(LanguageCode::from("en")),
                None,
                &mut filter,
                &mut display,
            )
            .expect_err("second open should fail");
        assert!(err.is_invariant());
        assert_eq!(controller.language(), Some(&LanguageCode::from("eo")));
    }

    #[test]
    fn completions_replace_results_in_service_order() {
        let (mut controller, mut filter, _display) = active("eo");
        controller.on_query_changed("hu", &mut filter);

        filter.queued = vec![filter.complete("hu", vec![result(9, 0), result(2, 1), result(5, 0)])];
        assert!(controller.on_background(&mut filter));

        assert_eq!(
            controller.results(),
            &[result(9, 0), result(2, 1), result(5, 0)]
        );
    }

    #[test]
    fn stale_completions_never_overwrite_the_latest_query() {
        let (mut controller, mut filter, _display) = active("eo");
        type_text(&mut controller, &mut filter, "hund");
        assert_eq!(filter.submitted.len(), 4);

        let latest = filter.complete("hund", vec![result(1, 0)]);
        let older = filter.complete("hun", vec![result(2, 0), result(3, 0)]);
        let oldest = filter.complete("h", vec![result(4, 0)]);

        assert!(controller.apply_event(latest));
        assert!(!controller.apply_event(older));
        assert!(!controller.apply_event(oldest));
        assert_eq!(controller.results(), &[result(1, 0)]);
    }

    #[test]
    fn older_completion_arriving_first_is_dropped_too() {
        let (mut controller, mut filter, _display) = active("en");
        type_text(&mut controller, &mut filter, "day");

        filter.queued = vec![
            filter.complete("da", vec![result(7, 0)]),
            filter.complete("d", vec![result(8, 0)]),
        ];
        assert!(!controller.on_background(&mut filter));
        assert!(controller.results().is_empty());
        assert_eq!(controller.status_segment(), Some("searching...".to_string()));

        filter.queued = vec![filter.complete("day", vec![result(2, 1)])];
        assert!(controller.on_background(&mut filter));
        assert_eq!(controller.results(), &[result(2, 1)]);
        assert_eq!(controller.status_segment(), Some("1 match".to_string()));
    }

    #[test]
    fn empty_query_clears_results_without_filtering() {
        let (mut controller, mut filter, _display) = active("eo");
        controller.on_query_changed("k", &mut filter);
        let pending = filter.complete("k", vec![result(1, 0)]);
        assert!(controller.apply_event(pending));

        controller.on_query_changed("", &mut filter);
        assert!(controller.results().is_empty());
        assert_eq!(filter.submitted.len(), 1);

        // The in-flight pass for "k" must not resurrect results.
        let late = filter.complete("k", vec![result(1, 0)]);
        assert!(!controller.apply_event(late));
        assert!(controller.results().is_empty());
        assert_eq!(controller.status_segment(), None);
    }

    #[test]
    fn repeating_the_same_text_is_idempotent() {
        let (mut controller, mut filter, _display) = active("eo");
        controller.on_query_changed("kato", &mut filter);
        controller.on_query_changed("kato", &mut filter);
        controller.on_query_changed("", &mut filter);
        controller.on_query_changed("", &mut filter);
        assert_eq!(filter.submitted.len(), 1);
    }

    #[test]
    fn failed_filter_clears_results_and_reports_error() {
        let (mut controller, mut filter, _display) = active("eo");
        controller.on_query_changed("k", &mut filter);
        let done = filter.complete("k", vec![result(1, 0)]);
        controller.apply_event(done);

        controller.on_query_changed("ka", &mut filter);
        let failed = FilterEvent::Failed {
            ticket: filter.ticket_for("ka"),
            message: "broken index".to_string(),
        };
        assert!(controller.apply_event(failed));
        assert!(controller.results().is_empty());
        assert_eq!(
            controller.status_segment(),
            Some("error: broken index".to_string())
        );
    }

    #[test]
    fn submission_failure_is_absorbed() {
        let (mut controller, mut filter, _display) = active("eo");
        controller.on_query_changed("k", &mut filter);
        let done = filter.complete("k", vec![result(1, 0)]);
        assert!(controller.apply_event(done));
        assert_eq!(controller.count(), 1);

        filter.fail_submit = true;
        controller.on_query_changed("kato", &mut filter);

        let session = controller.session().expect("session should be active");
        assert_eq!(session.query(), "kato");
        assert!(session.pending().is_none());
        assert!(session.last_error().is_some());
        // Results of "k" must not be shown for "kato".
        assert_eq!(controller.count(), 0);
    }

    #[test]
    fn result_changes_are_reported_once() {
        let (mut controller, mut filter, _display) = active("eo");
        assert!(!controller.take_results_changed());

        controller.on_query_changed("k", &mut filter);
        let done = filter.complete("k", vec![result(1, 0)]);
        controller.apply_event(done);
        assert!(controller.take_results_changed());
        assert!(!controller.take_results_changed());

        controller.on_query_changed("", &mut filter);
        assert!(controller.take_results_changed());
        assert!(!controller.take_results_changed());
    }

    #[test]
    fn activation_emits_exactly_one_navigation_per_index() {
        let (mut controller, mut filter, mut display) = active("eo");
        controller.on_query_changed("o", &mut filter);
        let results = vec![result(4, 0), result(2, 3), result(7, 1)];
        let done = filter.complete("o", results.clone());
        controller.apply_event(done);

        for (index, expected) in results.iter().enumerate() {
            display.navigations.clear();
            controller
                .on_result_activated(index, &mut display)
                .expect("index in range");
            assert_eq!(
                display.navigations,
                vec![NavigationRequest::OpenArticle {
                    article: expected.article,
                    mark: expected.mark,
                }]
            );
        }
        assert_eq!(controller.count(), 3);
    }

    #[test]
    fn out_of_range_activation_is_an_invariant_violation() {
        let (mut controller, mut filter, mut display) = active("eo");
        controller.on_query_changed("o", &mut filter);
        let done = filter.complete("o", vec![result(1, 0)]);
        controller.apply_event(done);

        for index in [1, 2, usize::MAX] {
            let err = controller
                .on_result_activated(index, &mut display)
                .expect_err("index out of range");
            assert!(err.is_invariant());
        }
        assert!(display.navigations.is_empty());
    }

    #[test]
    fn activation_without_session_is_an_invariant_violation() {
        let mut controller = controller();
        let mut filter = ManualFilter::default();
        let mut display = RecordingDisplay::default();
        controller
            .on_screen_opened(None, None, &mut filter, &mut display)
            .expect("screen should open");

        let err = controller
            .on_result_activated(0, &mut display)
            .expect_err("no session");
        assert!(err.is_invariant());
        assert!(display.navigations.is_empty());
    }

    #[test]
    fn resume_focuses_field_and_requests_soft_input() {
        let (controller, _filter, mut display) = active("eo");
        controller.on_screen_resumed(&mut display);
        assert_eq!(display.focus_calls, 1);
        assert_eq!(display.soft_input_calls, 1);
        assert!(display.navigations.is_empty());
    }

    #[test]
    fn language_menu_uses_session_language_and_capability() {
        let catalog = StaticCatalog::from_codes(["eo", "en", "fr", "de"]);
        let mut filter = ManualFilter::default();
        let mut display = RecordingDisplay::default();
        let mut controller = SearchController::new(Arc::new(ActionCapability::fixed(true)), 3);
        controller
            .on_screen_opened(
                Some(LanguageCode::from("en")),
                None,
                &mut filter,
                &mut display,
            )
            .expect("screen should open");

        let menu = controller.build_language_menu(&catalog);
        let codes: Vec<&str> = menu.iter().map(|e| e.target_language.as_str()).collect();
        assert_eq!(codes, vec!["eo", "fr"]);
        assert!(menu.iter().all(|entry| entry.emphasized));
    }

    #[test]
    fn language_action_carries_current_field_text() {
        let (controller, _filter, mut display) = active("eo");
        display.field = "hundo".to_string();
        let entry = MenuEntry {
            label: "Search in English".to_string(),
            target_language: LanguageCode::from("en"),
            emphasized: false,
        };

        controller.on_menu_action_selected(&MenuAction::Language(entry), &mut display);
        assert_eq!(
            display.navigations,
            vec![NavigationRequest::OpenSearch {
                language: LanguageCode::from("en"),
                search_term: Some("hundo".to_string()),
            }]
        );
    }

    #[test]
    fn shell_actions_pass_through_unchanged() {
        let (controller, _filter, mut display) = active("eo");
        display.field = "kato".to_string();
        controller.on_menu_action_selected(&MenuAction::Shell(ShellAction::About), &mut display);
        assert_eq!(
            display.navigations,
            vec![NavigationRequest::Shell(ShellAction::About)]
        );
    }

    #[test]
    fn closed_screen_ignores_late_completions() {
        let (mut controller, mut filter, _display) = active("eo");
        controller.on_query_changed("kato", &mut filter);
        let late = filter.complete("kato", vec![result(1, 0)]);
        let session = controller.session().map(|s| s.id());

        controller.on_screen_closed(&mut filter);
        assert_eq!(filter.closed, session.into_iter().collect::<Vec<_>>());
        assert!(!controller.apply_event(late));
        assert!(controller.results().is_empty());
    }

    #[test]
    fn completions_from_another_session_are_ignored() {
        let (mut first, mut filter, _display) = active("eo");
        let mut display = RecordingDisplay::default();
        let mut second = controller();
        second
            .on_screen_opened(
                Some(LanguageCode::from("en")),
                None,
                &mut filter,
                &mut display,
            )
            .expect("screen should open");

        first.on_query_changed("kat", &mut filter);
        second.on_query_changed("cat", &mut filter);
        let for_second = filter.complete("cat", vec![result(1, 0)]);

        assert!(!first.apply_event(for_second.clone()));
        assert!(second.apply_event(for_second));
        assert!(first.results().is_empty());
    }
}

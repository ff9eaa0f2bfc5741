//! Application controller
//!
//! The single owner of mutable application state: session, history, current
//! page and its bound view, open modal, inline notice and upload task.
//! Front-ends call its methods in response to events and re-render from
//! its accessors.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use super::history::HistoryBackend;
use super::location::{parse_query, HistoryEntry, NavParams};
use super::page::{Modal, Page};
use crate::error::AppResult;
use crate::session::{authenticate, AuthFailure, KeyValueStore, SessionState};
use crate::store::{RecordId, RecordStore, User};
use crate::upload::{UploadSchedule, UploadStep, UploadTask};
use crate::view::{
    project, strings, Clock, ConsolidatedView, Notice, PageView, SystemClock,
};

/// Result of a page change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub entry: HistoryEntry,
    /// DOM element to reveal
    pub section: String,
    /// Address bar value
    pub url: String,
}

/// Result of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected(AuthFailure),
}

/// Application state and transitions
pub struct AppController<S: KeyValueStore, H: HistoryBackend> {
    store: Arc<RecordStore>,
    session: SessionState<S>,
    history: H,
    clock: Box<dyn Clock>,
    schedule: UploadSchedule,
    success_timeout: Duration,
    page: Option<Page>,
    view: Option<PageView>,
    notice: Option<Notice>,
    modal: Option<Modal>,
    consolidated: Option<ConsolidatedView>,
    upload: Option<UploadTask>,
    upload_result: Option<Notice>,
}

impl<S: KeyValueStore, H: HistoryBackend> AppController<S, H> {
    pub fn new(store: Arc<RecordStore>, storage: S, history: H) -> Self {
        Self {
            store,
            session: SessionState::new(storage),
            history,
            clock: Box::new(SystemClock),
            schedule: UploadSchedule::default(),
            success_timeout: Notice::DEFAULT_SUCCESS_TIMEOUT,
            page: None,
            view: None,
            notice: None,
            modal: None,
            consolidated: None,
            upload: None,
            upload_result: None,
        }
    }

    /// Builder method: replace the clock used for generation stamps
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Builder method: replace the upload delays
    pub fn with_upload_schedule(mut self, schedule: UploadSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Builder method: replace how long success notices stay visible
    pub fn with_success_timeout(mut self, timeout: Duration) -> Self {
        self.success_timeout = timeout;
        self
    }

    // ============ Navigation ============

    /// Initial navigation from the address bar query string.
    ///
    /// Without a persisted session this always lands on the login page. With
    /// one it always lands on the dashboard; a deep link to another page is
    /// opened first so it sits one step back in history.
    pub fn start(&mut self, query: &str) -> AppResult<Transition> {
        let (page_id, params) = parse_query(query);
        if self.session.restore()?.is_none() {
            return Ok(self.navigate_to(Page::Login, NavParams::new()));
        }

        match Page::from_id(&page_id) {
            Some(Page::Login | Page::Dashboard) | None => {}
            Some(page) => {
                self.navigate_to(page, params);
            }
        }
        Ok(self.navigate_to(Page::Dashboard, NavParams::new()))
    }

    /// Navigate by page identifier. Unknown identifiers are ignored.
    pub fn navigate(&mut self, page_id: &str, params: NavParams) -> Option<Transition> {
        match Page::from_id(page_id) {
            Some(page) => Some(self.navigate_to(page, params)),
            None => {
                tracing::debug!(page = page_id, "Ignoring navigation to unknown page");
                None
            }
        }
    }

    /// Show `page`, push a history entry and load its data
    pub fn navigate_to(&mut self, page: Page, params: NavParams) -> Transition {
        let entry = HistoryEntry::new(page, params);
        let url = entry.to_url();
        self.history.push(&entry, &url);
        self.show(entry, url)
    }

    /// Replay a history entry (back/forward) without pushing a new one
    pub fn restore(&mut self, entry: HistoryEntry) -> Transition {
        let url = entry.to_url();
        self.show(entry, url)
    }

    /// Step back in history and replay the previous entry
    pub fn go_back(&mut self) -> Option<Transition> {
        let entry = self.history.back()?;
        Some(self.restore(entry))
    }

    pub fn view_prescription(&mut self, id: RecordId) -> Transition {
        self.navigate_to(Page::PrescriptionDetail, NavParams::new().with("id", id))
    }

    pub fn view_medication_history(&mut self, id: RecordId) -> Transition {
        self.navigate_to(Page::MedicationHistory, NavParams::new().with("id", id))
    }

    fn show(&mut self, entry: HistoryEntry, url: String) -> Transition {
        tracing::debug!(page = %entry.page, params = ?entry.params, "Navigating");

        // Anything pending belongs to the page being left
        self.cancel_upload();
        self.modal = None;
        self.notice = None;

        let view = self.load_page_data(entry.page, &entry.params);
        self.page = Some(entry.page);
        self.view = Some(view);

        Transition {
            section: entry.page.section_id(),
            entry,
            url,
        }
    }

    fn load_page_data(&mut self, page: Page, params: &NavParams) -> PageView {
        match page {
            Page::Login => PageView::Login,
            Page::Dashboard => PageView::Dashboard(project::dashboard(&self.store)),
            Page::PrescriptionDetail => {
                let id = params.id();
                self.session.set_current_prescription(id);
                let today = self.clock.today();
                let view = id.and_then(|id| project::prescription_detail(&self.store, id, today));
                if view.is_none() {
                    self.notice = Some(Notice::error(strings::PRESCRIPTION_NOT_FOUND));
                }
                PageView::PrescriptionDetail(view)
            }
            Page::MedicationHistory => {
                let id = params.id();
                self.session.set_current_medication(id);
                let view = id.and_then(|id| project::medication_history(&self.store, id));
                if view.is_none() {
                    self.notice = Some(Notice::error(strings::HISTORY_NOT_FOUND));
                }
                PageView::MedicationHistory(view)
            }
        }
    }

    // ============ Authentication ============

    /// Check credentials; on success sign in and open the dashboard.
    ///
    /// A rejected attempt only sets the inline error notice.
    pub fn login(&mut self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        match authenticate(&self.store, email, password) {
            Ok(user) => {
                self.session.sign_in(user)?;
                self.navigate_to(Page::Dashboard, NavParams::new());
                Ok(LoginOutcome::Accepted)
            }
            Err(reason) => {
                tracing::debug!(email = email, "Rejected credentials");
                tracing::warn!(?reason, "Login rejected");
                self.notice = Some(Notice::error(strings::INVALID_CREDENTIALS));
                Ok(LoginOutcome::Rejected(reason))
            }
        }
    }

    /// Clear the session and return to the login page
    pub fn logout(&mut self) -> AppResult<Transition> {
        self.session.sign_out()?;
        Ok(self.navigate_to(Page::Login, NavParams::new()))
    }

    // ============ Modals ============

    pub fn show_modal(&mut self, modal: Modal) {
        if modal == Modal::Consolidated {
            self.consolidated = Some(project::consolidated(&self.store));
        }
        self.modal = Some(modal);
    }

    /// Show a modal by element id. Unknown ids are ignored.
    pub fn show_modal_by_id(&mut self, element_id: &str) -> bool {
        match Modal::from_element_id(element_id) {
            Some(modal) => {
                self.show_modal(modal);
                true
            }
            None => false,
        }
    }

    /// Close `modal` if it is the open one. Closing the upload dialog
    /// cancels its upload.
    pub fn close_modal(&mut self, modal: Modal) {
        if self.modal != Some(modal) {
            return;
        }
        self.modal = None;
        if modal == Modal::Upload {
            self.cancel_upload();
        }
    }

    /// Open the consolidated view and return its content
    pub fn show_consolidated(&mut self) -> &ConsolidatedView {
        self.show_modal(Modal::Consolidated);
        self.consolidated
            .get_or_insert_with(|| project::consolidated(&self.store))
    }

    // ============ Upload ============

    /// Start a simulated upload, replacing any live one. Returns its ticket.
    pub fn begin_upload(&mut self, file_name: &str) -> Uuid {
        self.cancel_upload();
        self.upload_result = None;
        let task = UploadTask::new(file_name);
        let id = task.id();
        tracing::debug!(upload = %id, file = file_name, "Upload started");
        self.upload = Some(task);
        id
    }

    /// Deliver a timer completion. Ignored unless `ticket` is the live
    /// upload and `step` is due. Returns whether the step applied.
    pub fn complete_upload_step(&mut self, ticket: Uuid, step: UploadStep) -> bool {
        let Some(task) = self.upload.as_mut().filter(|task| task.id() == ticket) else {
            return false;
        };
        if !task.advance(step) {
            return false;
        }

        match step {
            UploadStep::Process => {
                self.upload_result = Some(Notice::success(strings::UPLOAD_PROCESSED));
            }
            UploadStep::Refresh => {
                if self.modal == Some(Modal::Upload) {
                    self.modal = None;
                }
                if self.page == Some(Page::Dashboard) {
                    self.view = Some(PageView::Dashboard(project::dashboard(&self.store)));
                }
            }
        }
        true
    }

    /// Cancel the live upload, if any
    pub fn cancel_upload(&mut self) -> bool {
        self.upload.as_mut().map_or(false, UploadTask::cancel)
    }

    pub fn dismiss_upload_result(&mut self) {
        self.upload_result = None;
    }

    // ============ Notices ============

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ============ Accessors ============

    pub fn page(&self) -> Option<Page> {
        self.page
    }

    pub fn view(&self) -> Option<&PageView> {
        self.view.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    pub fn consolidated(&self) -> Option<&ConsolidatedView> {
        self.consolidated.as_ref()
    }

    pub fn upload(&self) -> Option<&UploadTask> {
        self.upload.as_ref()
    }

    pub fn upload_result(&self) -> Option<&Notice> {
        self.upload_result.as_ref()
    }

    pub fn upload_schedule(&self) -> UploadSchedule {
        self.schedule
    }

    pub fn success_timeout(&self) -> Duration {
        self.success_timeout
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn session(&self) -> &SessionState<S> {
        &self.session
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MemoryHistory;
    use crate::session::{MemoryStore, SESSION_KEY};
    use crate::store::Dataset;
    use crate::upload::UploadPhase;
    use crate::view::{EmptyState, FixedClock, Listing, NoticeKind};
    use chrono::NaiveDate;

    type TestController = AppController<MemoryStore, MemoryHistory>;

    fn controller_with(store: RecordStore, storage: MemoryStore) -> TestController {
        AppController::new(Arc::new(store), storage, MemoryHistory::new())
            .with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()))
    }

    fn controller() -> TestController {
        controller_with(RecordStore::builtin(), MemoryStore::new())
    }

    fn logged_in() -> TestController {
        let mut app = controller();
        app.start("").unwrap();
        assert_eq!(
            app.login("teste@medfiles.com", "teste123").unwrap(),
            LoginOutcome::Accepted
        );
        app
    }

    fn persisted_session() -> MemoryStore {
        let user = RecordStore::builtin()
            .find_user_by_email("teste@medfiles.com")
            .cloned()
            .unwrap();
        let mut storage = MemoryStore::new();
        storage
            .set(SESSION_KEY, &serde_json::to_string(&user).unwrap())
            .unwrap();
        storage
    }

    #[test]
    fn test_start_without_session_shows_login() {
        let mut app = controller();
        let transition = app.start("?page=dashboard").unwrap();
        assert_eq!(transition.entry.page, Page::Login);
        assert_eq!(transition.section, "login-section");
        assert_eq!(app.view(), Some(&PageView::Login));
    }

    #[test]
    fn test_start_with_session_opens_dashboard() {
        let mut app = controller_with(RecordStore::builtin(), persisted_session());
        let transition = app.start("").unwrap();
        assert_eq!(transition.entry.page, Page::Dashboard);
        assert!(app.current_user().is_some());
    }

    #[test]
    fn test_start_with_session_ends_on_dashboard() {
        let mut app = controller_with(RecordStore::builtin(), persisted_session());
        let transition = app.start("?page=prescription-detail&id=3").unwrap();
        assert_eq!(transition.entry.page, Page::Dashboard);
        assert_eq!(app.history().current_url(), Some("?page=dashboard"));
        assert_eq!(app.history().len(), 2);
        assert_eq!(app.session().current_prescription(), Some(3));

        // The deep link is one step back
        let back = app.go_back().unwrap();
        assert_eq!(back.url, "?page=prescription-detail&id=3");
        assert!(matches!(app.view(), Some(PageView::PrescriptionDetail(Some(_)))));
    }

    #[test]
    fn test_start_with_session_on_login_or_unknown_page() {
        for query in ["?page=login", "?page=settings", "?page=dashboard"] {
            let mut app = controller_with(RecordStore::builtin(), persisted_session());
            let transition = app.start(query).unwrap();
            assert_eq!(transition.entry.page, Page::Dashboard, "{query}");
            assert_eq!(app.history().len(), 1, "{query}");
            assert!(app.go_back().is_none());
        }
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_start_recovers_from_corrupt_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"medfiles_user": tru"#).unwrap();

        let storage = crate::session::FileStore::open(&path).unwrap();
        let mut app = AppController::new(Arc::new(RecordStore::builtin()), storage, MemoryHistory::new());
        assert_eq!(app.start("").unwrap().entry.page, Page::Login);
        assert_eq!(app.logout().unwrap().entry.page, Page::Login);

        assert_eq!(
            app.login("teste@medfiles.com", "teste123").unwrap(),
            LoginOutcome::Accepted
        );
        assert_eq!(app.page(), Some(Page::Dashboard));
    }

    #[test]
    fn test_success_timeout_builder() {
        let app = controller();
        assert_eq!(app.success_timeout(), Notice::DEFAULT_SUCCESS_TIMEOUT);
        let app = app.with_success_timeout(Duration::from_millis(250));
        assert_eq!(app.success_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_login_scenario_dashboard_stats() {
        let app = logged_in();
        assert_eq!(app.page(), Some(Page::Dashboard));

        let Some(PageView::Dashboard(dashboard)) = app.view() else {
            panic!("expected dashboard view");
        };
        assert_eq!(dashboard.stats.total_prescriptions, 5);
        assert_eq!(dashboard.stats.active_medications, 5);
        assert_eq!(dashboard.stats.total_professionals, 5);
        assert_eq!(dashboard.stats.total_medications, 5);
        assert_eq!(app.history().current_url(), Some("?page=dashboard"));
    }

    #[test]
    fn test_login_persists_session() {
        let app = logged_in();
        let raw = app.session().storage().get(SESSION_KEY).unwrap().unwrap();
        assert!(raw.contains("teste@medfiles.com"));
    }

    #[test]
    fn test_rejected_login_changes_nothing() {
        for (email, password) in [
            ("teste@medfiles.com", "wrong"),
            ("other@medfiles.com", "teste123"),
            ("", ""),
        ] {
            let mut app = controller();
            app.start("").unwrap();
            let history_len = app.history().len();

            let outcome = app.login(email, password).unwrap();
            assert!(matches!(outcome, LoginOutcome::Rejected(_)));
            assert_eq!(app.page(), Some(Page::Login));
            assert_eq!(app.history().len(), history_len);
            assert!(app.current_user().is_none());
            assert!(app.session().storage().is_empty());

            let notice = app.notice().unwrap();
            assert_eq!(notice.kind, NoticeKind::Error);
            assert_eq!(notice.text, "Credenciais inválidas. Use teste@medfiles.com / teste123");
        }
    }

    #[test]
    fn test_logout() {
        let mut app = logged_in();
        let transition = app.logout().unwrap();
        assert_eq!(transition.entry.page, Page::Login);
        assert!(app.current_user().is_none());
        assert!(app.session().storage().is_empty());
    }

    #[test]
    fn test_unknown_page_is_noop() {
        let mut app = logged_in();
        let before = app.view().cloned();
        let history_len = app.history().len();

        assert!(app.navigate("settings", NavParams::new()).is_none());
        assert_eq!(app.page(), Some(Page::Dashboard));
        assert_eq!(app.view().cloned(), before);
        assert_eq!(app.history().len(), history_len);
    }

    #[test]
    fn test_prescription_not_found() {
        let mut app = logged_in();
        app.navigate("prescription-detail", NavParams::new().with("id", 999));

        assert_eq!(app.view(), Some(&PageView::PrescriptionDetail(None)));
        assert_eq!(app.notice().unwrap().text, "Prescrição não encontrada");
    }

    #[test]
    fn test_history_not_found() {
        let mut app = logged_in();
        app.view_medication_history(999);
        assert_eq!(app.view(), Some(&PageView::MedicationHistory(None)));
        assert_eq!(app.notice().unwrap().text, "Histórico não encontrado");
        assert_eq!(app.session().current_medication(), Some(999));
    }

    #[test]
    fn test_medication_history_selector() {
        let mut app = logged_in();
        let transition = app.view_medication_history(2);
        assert_eq!(transition.url, "?page=medication-history&id=2");
        assert_eq!(app.session().current_medication(), Some(2));

        let Some(PageView::MedicationHistory(Some(view))) = app.view() else {
            panic!("expected medication history");
        };
        assert_eq!(view.timeline.items().len(), 2);
        assert_eq!(view.related_prescriptions.items()[0].id, 2);
    }

    #[test]
    fn test_back_forward_replays_same_view() {
        let mut app = logged_in();
        let detail = app
            .navigate("prescription-detail", NavParams::new().with("id", 3))
            .unwrap();
        let detail_view = app.view().cloned();
        assert!(detail_view.as_ref().is_some_and(PageView::is_found));

        app.navigate_to(Page::Dashboard, NavParams::new());

        let replayed = app.go_back().unwrap();
        assert_eq!(replayed, detail);
        assert_eq!(app.view().cloned(), detail_view);
        assert_eq!(app.history().current_url(), Some("?page=prescription-detail&id=3"));

        // Forward replay through the same path the browser uses
        let entry = app.history_mut().forward().unwrap();
        let transition = app.restore(entry);
        assert_eq!(transition.entry.page, Page::Dashboard);
        assert_eq!(app.page(), Some(Page::Dashboard));
    }

    #[test]
    fn test_empty_store_dashboard() {
        let mut app = controller_with(RecordStore::new(Dataset::default()).unwrap(), persisted_session());
        // The persisted user is not in this store, but sessions are not re-validated
        app.start("").unwrap();

        let Some(PageView::Dashboard(dashboard)) = app.view() else {
            panic!("expected dashboard view");
        };
        assert_eq!(
            dashboard.recent_prescriptions,
            Listing::Empty(EmptyState::RECENT_PRESCRIPTIONS)
        );
    }

    #[test]
    fn test_consolidated_modal() {
        let mut app = logged_in();
        let view = app.show_consolidated().clone();
        assert_eq!(view.unique_count, 5);
        assert_eq!(app.modal(), Some(Modal::Consolidated));

        app.close_modal(Modal::Upload);
        assert_eq!(app.modal(), Some(Modal::Consolidated));
        app.close_modal(Modal::Consolidated);
        assert_eq!(app.modal(), None);

        assert!(app.show_modal_by_id("pharmacyModal"));
        assert!(!app.show_modal_by_id("nopeModal"));
        assert_eq!(app.modal(), Some(Modal::Pharmacy));
    }

    #[test]
    fn test_upload_completes_and_refreshes() {
        let mut app = logged_in();
        app.show_modal(Modal::Upload);

        let ticket = app.begin_upload("receita.pdf");
        assert!(!app.complete_upload_step(ticket, UploadStep::Refresh));

        assert!(app.complete_upload_step(ticket, UploadStep::Process));
        assert_eq!(
            app.upload_result().unwrap().text,
            "Arquivo processado com sucesso! (simulação)"
        );
        assert_eq!(app.modal(), Some(Modal::Upload));

        assert!(app.complete_upload_step(ticket, UploadStep::Refresh));
        assert_eq!(app.modal(), None);
        assert_eq!(app.upload().unwrap().phase(), UploadPhase::Finished);
        assert!(matches!(app.view(), Some(PageView::Dashboard(_))));
    }

    #[test]
    fn test_navigation_cancels_upload() {
        let mut app = logged_in();
        app.show_modal(Modal::Upload);
        let ticket = app.begin_upload("receita.pdf");

        app.view_prescription(1);
        assert_eq!(app.upload().unwrap().phase(), UploadPhase::Cancelled);
        assert_eq!(app.modal(), None);

        // Late timers do nothing
        assert!(!app.complete_upload_step(ticket, UploadStep::Process));
        assert!(!app.complete_upload_step(ticket, UploadStep::Refresh));
        assert!(app.upload_result().is_none());
        assert!(matches!(app.view(), Some(PageView::PrescriptionDetail(Some(_)))));
    }

    #[test]
    fn test_new_upload_supersedes_old_ticket() {
        let mut app = logged_in();
        let first = app.begin_upload("a.pdf");
        let second = app.begin_upload("b.pdf");
        assert!(!app.complete_upload_step(first, UploadStep::Process));
        assert!(app.complete_upload_step(second, UploadStep::Process));
    }

    #[test]
    fn test_closing_upload_modal_cancels() {
        let mut app = logged_in();
        app.show_modal(Modal::Upload);
        let ticket = app.begin_upload("a.pdf");
        app.close_modal(Modal::Upload);
        assert!(!app.complete_upload_step(ticket, UploadStep::Process));
    }
}

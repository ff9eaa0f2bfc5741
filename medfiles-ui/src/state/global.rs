//! Global Application State
//!
//! One [`AppController`] owns the application state; these signals mirror
//! its accessors so components re-render when it changes. Every mutation
//! goes through [`GlobalState::dispatch`].

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::*;
use medfiles::navigation::{AppController, Modal, Page};
use medfiles::store::{RecordStore, User};
use medfiles::upload::{UploadSchedule, UploadStep, UploadTask};
use medfiles::view::{ConsolidatedView, Notice, PageView};

use super::browser::{BrowserHistory, LocalStorage};

pub type Controller = AppController<LocalStorage, BrowserHistory>;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    controller: Rc<RefCell<Controller>>,
    /// Visible page
    pub page: RwSignal<Option<Page>>,
    /// Data bound to the visible page
    pub view: RwSignal<Option<PageView>>,
    /// Inline notice (single slot)
    pub notice: RwSignal<Option<Notice>>,
    /// Open modal
    pub modal: RwSignal<Option<Modal>>,
    pub consolidated: RwSignal<Option<ConsolidatedView>>,
    pub upload: RwSignal<Option<UploadTask>>,
    /// Message shown inside the upload dialog
    pub upload_result: RwSignal<Option<Notice>>,
    pub user: RwSignal<Option<User>>,
    upload_timers: Rc<RefCell<Vec<Timeout>>>,
    notice_timer: TimerSlot,
    upload_result_timer: TimerSlot,
}

/// Auto-clear timer for one notice slot. Replacing it cancels the old one.
type TimerSlot = Rc<RefCell<Option<Timeout>>>;

/// What a notice slot change does to its auto-clear timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    /// Unchanged, or just cleared (possibly by the timer itself)
    Keep,
    /// Replaced by a notice that stays up
    Cancel,
    /// Replaced by a success notice
    Arm,
}

fn timer_action(old: &Option<Notice>, new: &Option<Notice>) -> TimerAction {
    match new {
        _ if old == new => TimerAction::Keep,
        None => TimerAction::Keep,
        Some(notice) if notice.auto_clears() => TimerAction::Arm,
        Some(_) => TimerAction::Cancel,
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let controller = AppController::new(
        std::sync::Arc::new(RecordStore::builtin()),
        LocalStorage,
        BrowserHistory,
    )
    .with_upload_schedule(UploadSchedule::default());

    let state = GlobalState {
        controller: Rc::new(RefCell::new(controller)),
        page: create_rw_signal(None),
        view: create_rw_signal(None),
        notice: create_rw_signal(None),
        modal: create_rw_signal(None),
        consolidated: create_rw_signal(None),
        upload: create_rw_signal(None),
        upload_result: create_rw_signal(None),
        user: create_rw_signal(None),
        upload_timers: Rc::new(RefCell::new(Vec::new())),
        notice_timer: Rc::new(RefCell::new(None)),
        upload_result_timer: Rc::new(RefCell::new(None)),
    };

    provide_context(state.clone());
    state
}

/// Snapshot of the controller, taken before any signal is written
struct Snapshot {
    page: Option<Page>,
    view: Option<PageView>,
    notice: Option<Notice>,
    modal: Option<Modal>,
    consolidated: Option<ConsolidatedView>,
    upload: Option<UploadTask>,
    upload_result: Option<Notice>,
    user: Option<User>,
}

impl GlobalState {
    /// Run `action` against the controller, then refresh the signals
    pub fn dispatch<R>(&self, action: impl FnOnce(&mut Controller) -> R) -> R {
        let result = action(&mut self.controller.borrow_mut());
        self.sync();
        result
    }

    fn sync(&self) {
        let snapshot = {
            let app = self.controller.borrow();
            Snapshot {
                page: app.page(),
                view: app.view().cloned(),
                notice: app.notice().cloned(),
                modal: app.modal(),
                consolidated: app.consolidated().cloned(),
                upload: app.upload().cloned(),
                upload_result: app.upload_result().cloned(),
                user: app.current_user().cloned(),
            }
        };

        let action = timer_action(&self.notice.get_untracked(), &snapshot.notice);
        self.update_timer(&self.notice_timer, action, |app| app.dismiss_notice());
        let action = timer_action(
            &self.upload_result.get_untracked(),
            &snapshot.upload_result,
        );
        self.update_timer(&self.upload_result_timer, action, |app| app.dismiss_upload_result());

        set_if_changed(self.page, snapshot.page);
        set_if_changed(self.view, snapshot.view);
        set_if_changed(self.notice, snapshot.notice);
        set_if_changed(self.modal, snapshot.modal);
        set_if_changed(self.consolidated, snapshot.consolidated);
        set_if_changed(self.upload, snapshot.upload);
        set_if_changed(self.upload_result, snapshot.upload_result);
        set_if_changed(self.user, snapshot.user);
    }

    fn update_timer(&self, slot: &TimerSlot, action: TimerAction, clear: fn(&mut Controller)) {
        let timer = match action {
            TimerAction::Keep => return,
            TimerAction::Cancel => None,
            TimerAction::Arm => {
                let millis = self.controller.borrow().success_timeout().as_millis() as u32;
                let state = self.clone();
                Some(Timeout::new(millis, move || state.dispatch(clear)))
            }
        };
        *slot.borrow_mut() = timer;
    }

    /// Start a simulated upload and arm its step timers.
    ///
    /// Timers from an earlier upload are dropped, which cancels them.
    pub fn start_upload(&self, file_name: &str) {
        let ticket = self.dispatch(|app| app.begin_upload(file_name));
        let schedule = self.controller.borrow().upload_schedule();

        let mut due = 0u32;
        let timers = UploadStep::SEQUENCE
            .into_iter()
            .map(|step| {
                due += schedule.delay(step).as_millis() as u32;
                let state = self.clone();
                Timeout::new(due, move || {
                    state.dispatch(|app| app.complete_upload_step(ticket, step));
                })
            })
            .collect();

        *self.upload_timers.borrow_mut() = timers;
    }

    /// Report a failed controller action
    pub fn report(&self, context: &str, err: impl std::fmt::Display) {
        web_sys::console::error_1(&format!("{}: {}", context, err).into());
    }
}

fn set_if_changed<T: Clone + PartialEq + 'static>(signal: RwSignal<T>, value: T) {
    if signal.with_untracked(|current| *current != value) {
        signal.set(value);
    }
}

/// Access the global state from a component
pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

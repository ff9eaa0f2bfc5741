//! # MedFiles
//!
//! Prescription and medication-history viewer over a read-only, in-memory
//! record store. A patient signs in, sees active medications and recent
//! prescriptions, opens a prescription, and follows one medication's dose
//! changes over time.
//!
//! ## Modules
//!
//! - [`store`]: Mock records and the queries over them
//! - [`session`]: Signed-in user, durable session entry, record selectors
//! - [`navigation`]: Pages, URL codec, history and the [`AppController`]
//! - [`view`]: Per-page view models and a terminal renderer
//! - [`upload`]: Simulated, cancellable file upload
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use medfiles::navigation::{AppController, LoginOutcome, MemoryHistory, Page};
//! use medfiles::session::MemoryStore;
//! use medfiles::store::RecordStore;
//!
//! let mut app = AppController::new(
//!     Arc::new(RecordStore::builtin()),
//!     MemoryStore::new(),
//!     MemoryHistory::new(),
//! );
//! app.start("").unwrap();
//! assert_eq!(app.page(), Some(Page::Login));
//!
//! let outcome = app.login("teste@medfiles.com", "teste123").unwrap();
//! assert_eq!(outcome, LoginOutcome::Accepted);
//! assert_eq!(app.page(), Some(Page::Dashboard));
//! ```

#[cfg(feature = "native")]
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod store;
pub mod upload;
pub mod view;

// Re-export top-level types for convenience
pub use error::{AppError, AppResult};

pub use store::{
    ChangeKind, Dataset, Medication, MedicationChange, MedicationHistory, MedicationStatus,
    Prescription, Professional, RecordId, RecordStore, ResolvedPrescription, StoreError,
    StoreResult, StoreStats, User,
};

pub use session::{
    authenticate, AuthFailure, KeyValueStore, MemoryStore, SessionError, SessionResult,
    SessionState, SESSION_KEY,
};

pub use navigation::{
    AppController, HistoryBackend, HistoryEntry, LoginOutcome, MemoryHistory, Modal, NavParams,
    Page, Transition,
};

pub use view::{Clock, FixedClock, Notice, NoticeKind, PageView, SystemClock};

pub use upload::{UploadPhase, UploadSchedule, UploadStep, UploadTask};

#[cfg(feature = "native")]
pub use config::{generate_default_config, Config, ConfigError};

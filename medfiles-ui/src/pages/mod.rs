//! Pages
//!
//! One component per page section.

pub mod dashboard;
pub mod login;
pub mod medication_history;
pub mod prescription_detail;

pub use dashboard::Dashboard;
pub use login::Login;
pub use medication_history::MedicationHistory;
pub use prescription_detail::PrescriptionDetail;

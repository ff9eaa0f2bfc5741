//! Page and modal identifiers
//!
//! Identifiers double as the DOM binding contract: page `x` is shown in the
//! element `x-section`; modals use the camel-case ids of the host markup.

use serde::{Deserialize, Serialize};

/// A navigable page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Login,
    Dashboard,
    PrescriptionDetail,
    MedicationHistory,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Login,
        Page::Dashboard,
        Page::PrescriptionDetail,
        Page::MedicationHistory,
    ];

    /// Value used in the `page` query parameter
    pub fn id(self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Dashboard => "dashboard",
            Page::PrescriptionDetail => "prescription-detail",
            Page::MedicationHistory => "medication-history",
        }
    }

    /// Look up a page by identifier. Unknown identifiers have no section.
    pub fn from_id(id: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.id() == id)
    }

    /// Id of the DOM element holding this page
    pub fn section_id(self) -> String {
        format!("{}-section", self.id())
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Overlay dialogs on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modal {
    Upload,
    Consolidated,
    Pharmacy,
    Reports,
}

impl Modal {
    pub const ALL: [Modal; 4] = [
        Modal::Upload,
        Modal::Consolidated,
        Modal::Pharmacy,
        Modal::Reports,
    ];

    /// DOM element id
    pub fn element_id(self) -> &'static str {
        match self {
            Modal::Upload => "uploadModal",
            Modal::Consolidated => "consolidatedModal",
            Modal::Pharmacy => "pharmacyModal",
            Modal::Reports => "reportsModal",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Modal> {
        Modal::ALL.into_iter().find(|modal| modal.element_id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_id(page.id()), Some(page));
        }
        assert_eq!(Page::from_id("settings"), None);
        assert_eq!(Page::from_id(""), None);
    }

    #[test]
    fn test_section_id() {
        assert_eq!(Page::PrescriptionDetail.section_id(), "prescription-detail-section");
        assert_eq!(Page::Login.section_id(), "login-section");
    }

    #[test]
    fn test_page_serde_matches_id() {
        for page in Page::ALL {
            let json = serde_json::to_string(&page).unwrap();
            assert_eq!(json, format!("\"{}\"", page.id()));
        }
    }

    #[test]
    fn test_modal_ids() {
        assert_eq!(Modal::from_element_id("uploadModal"), Some(Modal::Upload));
        assert_eq!(Modal::from_element_id("helpModal"), None);
    }
}

//! Summary of what `FolioSite::attach` bound on the current page.
//!
//! Returned to JS as JSON so page scripts and smoke tests can check which
//! behaviors activated without poking at the DOM.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplashStatus {
    /// No splash element on this page.
    #[default]
    Absent,
    /// Waiting for the window `load` event.
    Pending,
    Shown,
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachReport {
    pub splash: SplashStatus,
    pub nav_links: usize,
    pub active_nav: Option<usize>,
    pub theme_toggle: bool,
    /// Names of the intersection fade groups that found their elements.
    pub fade_groups: Vec<String>,
    pub scroll_fade_elements: usize,
    pub overlay: bool,
    pub carousels: usize,
    pub carousels_skipped: usize,
}

impl AttachReport {
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_page_report() {
        let json: serde_json::Value =
            serde_json::from_str(&AttachReport::default().to_json()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "splash": "absent",
                "nav_links": 0,
                "active_nav": null,
                "theme_toggle": false,
                "fade_groups": [],
                "scroll_fade_elements": 0,
                "overlay": false,
                "carousels": 0,
                "carousels_skipped": 0,
            })
        );
    }

    #[test]
    fn home_page_report() {
        let report = AttachReport {
            splash: SplashStatus::Shown,
            nav_links: 4,
            active_nav: Some(0),
            theme_toggle: true,
            fade_groups: vec!["projects".into(), "exploratory".into()],
            carousels: 2,
            carousels_skipped: 1,
            ..AttachReport::default()
        };
        let json = report.to_json();
        assert!(json.contains(r#""splash":"shown""#));
        assert!(json.contains(r#""fade_groups":["projects","exploratory"]"#));
        let back: AttachReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}

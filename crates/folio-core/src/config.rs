//! Site configuration: timings, thresholds, and DOM hooks.
//!
//! Every field has a default matching the shipped markup, so an empty JSON
//! object (or no config at all) yields a working setup.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors produced while loading or validating a [`SiteConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The JSON document could not be decoded.
    Parse(String),
    /// A value is outside its allowed range.
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration for every behavior unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub splash: SplashConfig,
    pub fade: FadeConfig,
    pub nav: NavConfig,
    pub selectors: Selectors,
    /// Minimum level forwarded to the browser console (`error` … `trace`).
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            splash: SplashConfig::default(),
            fade: FadeConfig::default(),
            nav: NavConfig::default(),
            selectors: Selectors::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Decode and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field and range constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.fade.threshold) {
            return Err(ConfigError::Invalid {
                field: "fade.threshold",
                reason: format!("{} is outside [0, 1]", self.fade.threshold),
            });
        }
        if !(0.0..=1.0).contains(&self.fade.min_opacity) {
            return Err(ConfigError::Invalid {
                field: "fade.min_opacity",
                reason: format!("{} is outside [0, 1]", self.fade.min_opacity),
            });
        }
        if self.splash.cadence == 0 {
            return Err(ConfigError::Invalid {
                field: "splash.cadence",
                reason: "must be at least 1".into(),
            });
        }
        if self.splash.text_delay_ms < self.splash.line_delay_ms {
            return Err(ConfigError::Invalid {
                field: "splash.text_delay_ms",
                reason: format!(
                    "{} fires before the line stage at {}",
                    self.splash.text_delay_ms, self.splash.line_delay_ms
                ),
            });
        }
        Ok(())
    }
}

/// Splash reveal timings and cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Delay from load to the line-formation stage.
    pub line_delay_ms: u64,
    /// Delay from load to the text fade-in stage.
    pub text_delay_ms: u64,
    /// Exit animation length between dismissal and removal.
    pub exit_delay_ms: u64,
    /// Every `cadence`-th load shows the splash again.
    pub cadence: u64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            line_delay_ms: 5_200,
            text_delay_ms: 6_200,
            exit_delay_ms: 1_400,
            cadence: 10,
        }
    }
}

impl SplashConfig {
    #[must_use]
    pub fn line_delay(&self) -> Duration {
        Duration::from_millis(self.line_delay_ms)
    }

    #[must_use]
    pub fn text_delay(&self) -> Duration {
        Duration::from_millis(self.text_delay_ms)
    }

    #[must_use]
    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }
}

/// Fade thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Visible fraction at which an observed element counts as in view.
    pub threshold: f64,
    /// Pixels before the viewport bottom at which scroll fading starts.
    pub scroll_lead_px: f64,
    /// Floor for scroll-driven opacity.
    pub min_opacity: f64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            scroll_lead_px: 150.0,
            min_opacity: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Page name a bare directory path (`/`) resolves to.
    pub index_document: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            index_document: "index.html".to_string(),
        }
    }
}

/// CSS selectors and element ids each unit binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub splash_id: String,
    pub splash_images: String,
    pub splash_title: String,
    pub splash_hint: String,
    pub nav_links: String,
    pub theme_toggle_id: String,
    pub projects_section: String,
    pub projects_targets: String,
    pub exploratory_header: String,
    pub exploratory_items: String,
    pub exploratory_item_targets: String,
    pub about_roots: String,
    pub about_targets: String,
    pub project_page: String,
    pub project_fade_targets: String,
    pub carousel: String,
    pub carousel_strip: String,
    pub carousel_prev: String,
    pub carousel_next: String,
    pub expandable_images: String,
    pub overlay_id: String,
    pub overlay_image_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            splash_id: "splash".into(),
            splash_images: ".splash-images".into(),
            splash_title: ".splash-title".into(),
            splash_hint: ".enter-hint".into(),
            nav_links: "nav a".into(),
            theme_toggle_id: "themeToggle".into(),
            projects_section: ".projects.container".into(),
            projects_targets: ".section-header-large, .project-text h1, .project-text p".into(),
            exploratory_header: "#exploratory-header".into(),
            exploratory_items: ".exploratory-item".into(),
            exploratory_item_targets: "h3, p".into(),
            about_roots: ".about-intro-wrapper, .about-section".into(),
            about_targets: ".about-intro-wrapper h1, .about-intro-wrapper p, \
                            .about-section h1, .about-section h2, .about-section p, \
                            .experience-section h2, .experience-item h3, .experience-item p, \
                            .experience-date"
                .into(),
            project_page: ".project-page".into(),
            project_fade_targets:
                "h1, h2, h3, p, li, .project-meta, .design-content, video, i, img".into(),
            carousel: ".carousel".into(),
            carousel_strip: ".carousel-inner".into(),
            carousel_prev: ".prev".into(),
            carousel_next: ".next".into(),
            expandable_images: ".click-expand-img".into(),
            overlay_id: "imgOverlay".into(),
            overlay_image_id: "overlayImg".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.splash.line_delay(), Duration::from_millis(5_200));
        assert_eq!(config.splash.text_delay(), Duration::from_millis(6_200));
        assert_eq!(config.splash.exit_delay(), Duration::from_millis(1_400));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config =
            SiteConfig::from_json(r#"{"splash":{"cadence":5},"log_level":"debug"}"#).unwrap();
        assert_eq!(config.splash.cadence, 5);
        assert_eq!(config.splash.line_delay_ms, 5_200);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.fade, FadeConfig::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SiteConfig::from_json("{splash").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let err = SiteConfig::from_json(r#"{"fade":{"threshold":1.5}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "fade.threshold",
                ..
            }
        ));
    }

    #[test]
    fn zero_cadence_is_rejected() {
        let err = SiteConfig::from_json(r#"{"splash":{"cadence":0}}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid splash.cadence: must be at least 1");
    }

    #[test]
    fn text_before_line_is_rejected() {
        let err = SiteConfig::from_json(r#"{"splash":{"text_delay_ms":100}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "splash.text_delay_ms",
                ..
            }
        ));
    }

    #[test]
    fn swipe_threshold_is_not_configurable() {
        let config = SiteConfig::from_json(r#"{"carousel":{"swipe_threshold_px":0}}"#).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn serializes_back_to_json() {
        let json = serde_json::to_string(&SiteConfig::default()).unwrap();
        assert_eq!(SiteConfig::from_json(&json).unwrap(), SiteConfig::default());
    }
}

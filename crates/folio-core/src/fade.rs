//! Visibility-driven brightening and scroll-driven opacity.
//!
//! Two independent mechanisms live here:
//!
//! - [`IntersectionFade`] / [`FadeGroup`]: one parametrized behavior reused by
//!   every section that brightens while in view (projects, exploratory items,
//!   about text). The host feeds intersection entries; the group answers with
//!   the desired `active` state for the element and for any shared element.
//! - [`ScrollFader`]: a continuous opacity ramp for detail pages, recomputed
//!   from each element's viewport offset on every scroll.

use std::collections::BTreeSet;

use crate::config::FadeConfig;
use crate::theme::Theme;

/// Class marking a brightened element.
pub const ACTIVE_CLASS: &str = "active";

/// Slack applied to reported intersection ratios.
pub const RATIO_EPSILON: f64 = 1e-3;

/// Threshold-based in-view test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionFade {
    threshold: f64,
}

impl IntersectionFade {
    /// `threshold` is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self { threshold }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// An element is in view once the visible fraction reaches the threshold.
    ///
    /// Browsers report ratios at a threshold crossing with float noise, so the
    /// comparison allows [`RATIO_EPSILON`] of slack.
    #[must_use]
    pub fn in_view(&self, is_intersecting: bool, ratio: f64) -> bool {
        is_intersecting && ratio + RATIO_EPSILON >= self.threshold
    }
}

impl Default for IntersectionFade {
    fn default() -> Self {
        Self::new(FadeConfig::default().threshold)
    }
}

/// Desired state after an intersection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeUpdate {
    /// Observed element the entry was for.
    pub id: usize,
    /// Whether that element's targets should carry the active class.
    pub active: bool,
    /// Whether the group's shared element (if any) should carry it.
    pub shared_active: bool,
}

/// Intersection state for one group of observed elements.
///
/// Ids are assigned by the host (observation order). A group may observe a
/// single trigger that lights a whole section, or one id per element. State
/// is a set of the ids currently in view, so repeated enter/leave entries
/// never accumulate.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeGroup {
    name: &'static str,
    fade: IntersectionFade,
    in_view: BTreeSet<usize>,
}

impl FadeGroup {
    #[must_use]
    pub fn new(name: &'static str, fade: IntersectionFade) -> Self {
        Self {
            name,
            fade,
            in_view: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn is_active(&self, id: usize) -> bool {
        self.in_view.contains(&id)
    }

    /// Number of observed elements currently in view.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.in_view.len()
    }

    /// Apply one intersection entry.
    pub fn observe(&mut self, id: usize, is_intersecting: bool, ratio: f64) -> FadeUpdate {
        let active = self.fade.in_view(is_intersecting, ratio);
        if active {
            self.in_view.insert(id);
        } else {
            self.in_view.remove(&id);
        }
        tracing::trace!(group = self.name, id, active, "fade entry");
        FadeUpdate {
            id,
            active,
            shared_active: !self.in_view.is_empty(),
        }
    }
}

/// Opacity factor for an element whose top edge sits `top` px below the
/// viewport top: `clamp((H - top + lead) / H, min, 1)`.
///
/// A non-positive viewport height yields full opacity.
#[must_use]
pub fn scroll_opacity(viewport_h: f64, top: f64, lead: f64, min: f64) -> f64 {
    if viewport_h.is_nan() || viewport_h <= 0.0 || top.is_nan() {
        return 1.0;
    }
    let min = min.clamp(0.0, 1.0);
    ((viewport_h - top + lead) / viewport_h).clamp(min, 1.0)
}

/// Whether an element fades through opacity or through its text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FadeKind {
    Media,
    Text,
}

impl FadeKind {
    /// Classify by DOM tag name (case-insensitive).
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("video") || tag.eq_ignore_ascii_case("img") {
            Self::Media
        } else {
            Self::Text
        }
    }

    /// Decide whether a detail-page element takes part in the scroll fade.
    ///
    /// Carousel images keep their own presentation; every other matched
    /// element fades, including text and icons inside a carousel.
    #[must_use]
    pub fn classify(tag: &str, in_carousel: bool) -> Option<Self> {
        if in_carousel && tag.eq_ignore_ascii_case("img") {
            return None;
        }
        Some(Self::from_tag(tag))
    }
}

/// Inline style to write for one element.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleUpdate {
    /// `style.opacity`
    Opacity(String),
    /// `style.color`
    Color(String),
}

fn format_factor(f: f64) -> String {
    let rounded = (f * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFader {
    lead: f64,
    min: f64,
}

impl ScrollFader {
    #[must_use]
    pub fn new(config: &FadeConfig) -> Self {
        Self {
            lead: config.scroll_lead_px,
            min: config.min_opacity,
        }
    }

    #[must_use]
    pub fn factor(&self, viewport_h: f64, top: f64) -> f64 {
        scroll_opacity(viewport_h, top, self.lead, self.min)
    }

    /// Style for one element given the current theme and its viewport offset.
    #[must_use]
    pub fn style_for(
        &self,
        kind: FadeKind,
        theme: Theme,
        viewport_h: f64,
        top: f64,
    ) -> StyleUpdate {
        let factor = format_factor(self.factor(viewport_h, top));
        match kind {
            FadeKind::Media => StyleUpdate::Opacity(factor),
            FadeKind::Text => {
                let (r, g, b) = theme.text_rgb();
                StyleUpdate::Color(format!("rgba({r},{g},{b},{factor})"))
            }
        }
    }
}

impl Default for ScrollFader {
    fn default() -> Self {
        Self::new(&FadeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(IntersectionFade::new(2.0).threshold(), 1.0);
        assert_eq!(IntersectionFade::new(-1.0).threshold(), 0.0);
        assert_eq!(IntersectionFade::new(f64::NAN).threshold(), 0.0);
        assert_eq!(IntersectionFade::default().threshold(), 0.3);
    }

    #[test]
    fn in_view_needs_threshold() {
        let fade = IntersectionFade::new(0.3);
        assert!(fade.in_view(true, 0.3));
        assert!(fade.in_view(true, 0.9));
        assert!(!fade.in_view(true, 0.29));
        assert!(!fade.in_view(false, 0.5));
    }

    #[test]
    fn reentering_is_idempotent() {
        let mut group = FadeGroup::new("about", IntersectionFade::default());
        for _ in 0..3 {
            assert!(group.observe(4, true, 0.5).active);
            assert!(group.observe(4, true, 0.6).active);
            assert_eq!(group.active_count(), 1);
            assert!(!group.observe(4, false, 0.0).active);
            assert_eq!(group.active_count(), 0);
        }
    }

    #[test]
    fn shared_element_stays_lit_while_any_item_in_view() {
        let mut group = FadeGroup::new("exploratory", IntersectionFade::default());
        assert!(group.observe(0, true, 1.0).shared_active);
        assert!(group.observe(1, true, 0.4).shared_active);
        let left = group.observe(0, false, 0.0);
        assert!(!left.active);
        assert!(left.shared_active);
        assert!(!group.observe(1, false, 0.0).shared_active);
    }

    #[test]
    fn opacity_at_viewport_bottom() {
        // top == H gives 150 / H, then clamped.
        assert_eq!(scroll_opacity(1000.0, 1000.0, 150.0, 0.4), 0.4);
        assert!((scroll_opacity(300.0, 300.0, 150.0, 0.4) - 0.5).abs() < 1e-12);
        assert_eq!(scroll_opacity(100.0, 100.0, 150.0, 0.4), 1.0);
    }

    #[test]
    fn opacity_bounds() {
        assert_eq!(scroll_opacity(800.0, -500.0, 150.0, 0.4), 1.0);
        assert_eq!(scroll_opacity(800.0, 5_000.0, 150.0, 0.4), 0.4);
        assert_eq!(scroll_opacity(0.0, 10.0, 150.0, 0.4), 1.0);
        assert_eq!(scroll_opacity(-5.0, 10.0, 150.0, 0.4), 1.0);
    }

    #[test]
    fn media_gets_opacity_text_gets_color() {
        let fader = ScrollFader::default();
        assert_eq!(
            fader.style_for(FadeKind::Media, Theme::Dark, 1000.0, 5_000.0),
            StyleUpdate::Opacity("0.4".into())
        );
        assert_eq!(
            fader.style_for(FadeKind::Text, Theme::Dark, 1000.0, 0.0),
            StyleUpdate::Color("rgba(255,255,255,1)".into())
        );
        assert_eq!(
            fader.style_for(FadeKind::Text, Theme::Light, 1000.0, 450.0),
            StyleUpdate::Color("rgba(0,0,0,0.7)".into())
        );
    }

    #[test]
    fn tag_classification() {
        assert_eq!(FadeKind::from_tag("IMG"), FadeKind::Media);
        assert_eq!(FadeKind::from_tag("video"), FadeKind::Media);
        assert_eq!(FadeKind::from_tag("P"), FadeKind::Text);
        assert_eq!(FadeKind::from_tag("I"), FadeKind::Text);
    }

    #[test]
    fn carousel_images_skip_scroll_fade() {
        assert_eq!(FadeKind::classify("IMG", true), None);
        assert_eq!(FadeKind::classify("img", true), None);
    }

    #[test]
    fn carousel_text_and_icons_still_fade() {
        assert_eq!(FadeKind::classify("P", true), Some(FadeKind::Text));
        assert_eq!(FadeKind::classify("I", true), Some(FadeKind::Text));
        assert_eq!(FadeKind::classify("LI", true), Some(FadeKind::Text));
        assert_eq!(FadeKind::classify("VIDEO", true), Some(FadeKind::Media));
    }

    #[test]
    fn media_outside_carousel_fades_by_opacity() {
        assert_eq!(FadeKind::classify("IMG", false), Some(FadeKind::Media));
        assert_eq!(FadeKind::classify("VIDEO", false), Some(FadeKind::Media));
        assert_eq!(FadeKind::classify("H2", false), Some(FadeKind::Text));
    }
}

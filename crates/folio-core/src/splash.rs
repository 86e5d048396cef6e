//! Splash screen: show/skip decision and the timed reveal.
//!
//! # Load sequence
//!
//! 1. Record the page load in the durable visit counter (always, first).
//! 2. Consume the session `navClick` flag.
//! 3. Decide: `show = !nav_flag && (visits == 0 || visits % cadence == 0 || external)`,
//!    where `visits` is the count **before** this load was recorded.
//! 4. Skip → remove the splash and theme the body. Show → theme the splash
//!    and start the [`SplashTimeline`].
//!
//! # Timeline
//!
//! ```text
//!  Idle ──start──▶ Forming ──+line──▶ Lined ──+text──▶ TextVisible
//!                     │                 │                  │
//!                     └────────────dismiss─────────────────┘
//!                                       ▼
//!                                    Closing ──+exit──▶ Closed
//! ```
//!
//! Stage deadlines are measured from the same origin (`start`). Dismissal
//! moves to `Closing` from any earlier phase and drops the stage deadlines
//! that have not fired yet; the host only ever needs one pending timer, for
//! [`SplashTimeline::next_deadline`].

use std::time::Duration;

use url::Url;

use crate::config::SplashConfig;
use crate::prefs::{PreferenceStore, VisitCounter, keys, take_flag};
use crate::theme::Theme;

/// Returns true when `referrer` comes from outside the site at `hostname`.
///
/// A referrer host containing `hostname` (the same host or a subdomain such
/// as `www.`) is internal. An absent or blank referrer is never external.
/// Unparseable referrers fall back to a substring check on the whole string.
#[must_use]
pub fn referrer_is_external(referrer: Option<&str>, hostname: &str) -> bool {
    let Some(referrer) = referrer.map(str::trim).filter(|r| !r.is_empty()) else {
        return false;
    };
    let hostname = hostname.to_ascii_lowercase();
    match Url::parse(referrer) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
            !host.contains(&hostname)
        }
        Err(_) => !referrer.to_ascii_lowercase().contains(&hostname),
    }
}

/// Inputs and outcome of the show/skip decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashDecision {
    /// Visit count before this load was recorded.
    pub previous_visits: u64,
    pub first_visit: bool,
    pub cadence_hit: bool,
    pub external_referrer: bool,
    /// Set when the previous page was left through a nav link.
    pub nav_suppressed: bool,
}

impl SplashDecision {
    #[must_use]
    pub fn evaluate(
        previous_visits: u64,
        cadence: u64,
        referrer: Option<&str>,
        hostname: &str,
        nav_suppressed: bool,
    ) -> Self {
        Self {
            previous_visits,
            first_visit: previous_visits == 0,
            cadence_hit: cadence != 0 && previous_visits % cadence == 0,
            external_referrer: referrer_is_external(referrer, hostname),
            nav_suppressed,
        }
    }

    /// Whether the splash should be shown on this load.
    #[must_use]
    pub const fn show(&self) -> bool {
        !self.nav_suppressed && (self.first_visit || self.cadence_hit || self.external_referrer)
    }
}

/// Inline colors applied to the splash before the reveal.
///
/// `None` leaves the stylesheet value in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashPalette {
    pub background: Option<&'static str>,
    pub title_color: Option<&'static str>,
    pub hint_color: Option<&'static str>,
}

impl SplashPalette {
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Some("#fff"),
                title_color: Some("#000"),
                hint_color: Some("rgba(0,0,0,0.7)"),
            },
            Theme::Dark => Self {
                background: None,
                title_color: None,
                hint_color: None,
            },
        }
    }
}

/// What the splash should do on this page load.
#[derive(Debug, Clone, PartialEq)]
pub enum SplashController {
    /// Remove the splash right away and theme the body.
    Skip {
        decision: SplashDecision,
        theme: Theme,
    },
    /// Theme the splash and run the reveal.
    Show {
        decision: SplashDecision,
        palette: SplashPalette,
        timeline: SplashTimeline,
    },
}

impl SplashController {
    /// Run the load sequence against the injected stores.
    ///
    /// The visit counter is incremented before anything else, whether or not
    /// the splash ends up showing.
    pub fn on_load(
        durable: &dyn PreferenceStore,
        session: &dyn PreferenceStore,
        referrer: Option<&str>,
        hostname: &str,
        config: &SplashConfig,
    ) -> Self {
        let previous_visits = VisitCounter::record_load(durable);
        let nav_suppressed = take_flag(session, keys::NAV_CLICK);
        let decision = SplashDecision::evaluate(
            previous_visits,
            config.cadence,
            referrer,
            hostname,
            nav_suppressed,
        );
        let theme = Theme::load(durable);

        tracing::debug!(
            previous_visits,
            first_visit = decision.first_visit,
            cadence_hit = decision.cadence_hit,
            external_referrer = decision.external_referrer,
            nav_suppressed,
            show = decision.show(),
            "splash decision"
        );

        if decision.show() {
            Self::Show {
                decision,
                palette: SplashPalette::for_theme(theme),
                timeline: SplashTimeline::new(config, theme),
            }
        } else {
            Self::Skip { decision, theme }
        }
    }

    #[must_use]
    pub const fn decision(&self) -> &SplashDecision {
        match self {
            Self::Skip { decision, .. } | Self::Show { decision, .. } => decision,
        }
    }
}

/// Input that closes the splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissTrigger {
    Click,
    Key,
    Wheel,
    Touch,
}

impl DismissTrigger {
    /// Classify a DOM `KeyboardEvent.key`. Only Enter and Space dismiss.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " | "Spacebar" => Some(Self::Key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplashPhase {
    Idle,
    Forming,
    Lined,
    TextVisible,
    Closing,
    Closed,
}

/// Side effects the host applies to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashEffect {
    /// Add `splash-line` to the image strip.
    AddLineClass,
    /// Add `splash-visible` to the splash root.
    AddVisibleClass,
    /// Add `fade-out` to the splash root.
    AddExitClass,
    /// Detach the splash from the document.
    RemoveSplash,
    /// Apply the persisted theme to the document body.
    ApplyBodyTheme(Theme),
}

/// Single-scheduler state machine for the splash reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashTimeline {
    phase: SplashPhase,
    theme: Theme,
    line_delay: Duration,
    text_delay: Duration,
    exit_delay: Duration,
    origin: Duration,
    closing_at: Duration,
}

impl SplashTimeline {
    #[must_use]
    pub fn new(config: &SplashConfig, theme: Theme) -> Self {
        Self {
            phase: SplashPhase::Idle,
            theme,
            line_delay: config.line_delay(),
            text_delay: config.text_delay(),
            exit_delay: config.exit_delay(),
            origin: Duration::ZERO,
            closing_at: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> SplashPhase {
        self.phase
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Begin the reveal at `now`. Stage deadlines are relative to this origin.
    pub fn start(&mut self, now: Duration) {
        if self.phase == SplashPhase::Idle {
            self.origin = now;
            self.phase = SplashPhase::Forming;
            tracing::debug!(?now, "splash forming");
        }
    }

    /// Absolute time of the next pending transition, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.phase {
            SplashPhase::Forming => Some(self.origin.saturating_add(self.line_delay)),
            SplashPhase::Lined => Some(self.origin.saturating_add(self.text_delay)),
            SplashPhase::Closing => Some(self.closing_at.saturating_add(self.exit_delay)),
            SplashPhase::Idle | SplashPhase::TextVisible | SplashPhase::Closed => None,
        }
    }

    /// Fire every transition whose deadline is at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<SplashEffect> {
        let mut effects = Vec::new();
        while let Some(deadline) = self.next_deadline() {
            if deadline > now {
                break;
            }
            match self.phase {
                SplashPhase::Forming => {
                    self.phase = SplashPhase::Lined;
                    effects.push(SplashEffect::AddLineClass);
                }
                SplashPhase::Lined => {
                    self.phase = SplashPhase::TextVisible;
                    effects.push(SplashEffect::AddVisibleClass);
                }
                SplashPhase::Closing => {
                    self.phase = SplashPhase::Closed;
                    effects.push(SplashEffect::RemoveSplash);
                    effects.push(SplashEffect::ApplyBodyTheme(self.theme));
                }
                SplashPhase::Idle | SplashPhase::TextVisible | SplashPhase::Closed => break,
            }
            tracing::debug!(phase = ?self.phase, ?now, "splash transition");
        }
        effects
    }

    /// Close the splash. A no-op once closing has begun.
    pub fn dismiss(&mut self, now: Duration, trigger: DismissTrigger) -> Vec<SplashEffect> {
        match self.phase {
            SplashPhase::Closing | SplashPhase::Closed => Vec::new(),
            _ => {
                tracing::debug!(?trigger, from = ?self.phase, ?now, "splash dismissed");
                self.phase = SplashPhase::Closing;
                self.closing_at = now;
                vec![SplashEffect::AddExitClass]
            }
        }
    }
}

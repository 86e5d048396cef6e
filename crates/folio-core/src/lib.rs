#![forbid(unsafe_code)]

//! Host-agnostic behavior engine for the Folio portfolio site.
//!
//! `folio-core` owns every decision the site's client-side layer makes, without
//! touching the DOM, timers, or browser storage. The web frontend
//! (`folio-web`) resolves element handles, forwards events, and applies the
//! effects computed here.
//!
//! # Primary responsibilities
//!
//! - **Prefs**: the preference-store seam (`visitCount`, `theme`, `navClick`).
//! - **Splash**: show/skip decision and the timed reveal state machine.
//! - **Nav**: current-page link highlighting.
//! - **Theme**: light/dark preference with single-flip tap de-duplication.
//! - **Fade**: intersection-driven brightening and scroll-driven opacity.
//! - **Overlay**: expanded image viewer state.
//! - **Carousel**: circular slide index and swipe classification.
//!
//! # Design principles
//!
//! - **No I/O**: storage is injected through [`PreferenceStore`]; time is
//!   passed in by the host as a [`core::time::Duration`] since page load.
//! - **Deterministic**: identical inputs always produce identical effects.
//! - **`#![forbid(unsafe_code)]`**: safety enforced at compile time.

pub mod carousel;
pub mod config;
pub mod fade;
pub mod nav;
pub mod overlay;
pub mod prefs;
pub mod splash;
pub mod theme;

pub use carousel::{BindError, Carousel, CarouselPart, SwipeDirection, SwipeTracker};
pub use config::{ConfigError, FadeConfig, NavConfig, Selectors, SiteConfig, SplashConfig};
pub use fade::{
    FadeGroup, FadeKind, FadeUpdate, IntersectionFade, ScrollFader, StyleUpdate, scroll_opacity,
};
pub use nav::{NavHighlighter, last_segment};
pub use overlay::Overlay;
pub use prefs::{MemoryStore, PreferenceStore, StoreError, StoreResult, VisitCounter, keys};
pub use splash::{
    DismissTrigger, SplashController, SplashDecision, SplashEffect, SplashPalette, SplashPhase,
    SplashTimeline, referrer_is_external,
};
pub use theme::{TapGuard, TapInput, Theme, ThemeToggle};

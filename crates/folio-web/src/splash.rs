//! Splash binding: runs the load sequence and drives the reveal timeline.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{
    DismissTrigger, PreferenceStore, SiteConfig, SplashController, SplashEffect, SplashPalette,
    SplashTimeline, Theme,
};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, Window};

use crate::dom::{self, PageClock};
use crate::report::SplashStatus;

const LINE_CLASS: &str = "splash-line";
const VISIBLE_CLASS: &str = "splash-visible";
const EXIT_CLASS: &str = "fade-out";

struct SplashState {
    document: Document,
    root: Element,
    images: Option<Element>,
    durable: Rc<dyn PreferenceStore>,
    timeline: SplashTimeline,
    clock: PageClock,
    /// Bumped on every reschedule; timers from older generations do nothing.
    generation: u64,
}

pub(crate) struct SplashBinding {
    state: Option<Rc<RefCell<SplashState>>>,
    _listeners: Vec<EventListener>,
}

impl SplashBinding {
    /// Run the load sequence. Returns `None` when the page has no splash.
    pub(crate) fn attach(
        window: &Window,
        document: &Document,
        durable: Rc<dyn PreferenceStore>,
        session: &dyn PreferenceStore,
        config: &SiteConfig,
        clock: PageClock,
    ) -> Option<Self> {
        let selectors = &config.selectors;
        let root = document.get_element_by_id(&selectors.splash_id)?;

        let referrer = document.referrer();
        let hostname = window.location().hostname().unwrap_or_default();
        let plan = SplashController::on_load(
            durable.as_ref(),
            session,
            Some(referrer.as_str()),
            &hostname,
            &config.splash,
        );

        let (palette, mut timeline) = match plan {
            SplashController::Skip { theme, .. } => {
                root.remove();
                dom::apply_body_theme(document, theme);
                tracing::debug!("splash skipped");
                let binding = Self {
                    state: None,
                    _listeners: Vec::new(),
                };
                return Some(binding);
            }
            SplashController::Show {
                palette, timeline, ..
            } => (palette, timeline),
        };

        apply_palette(&root, &palette, selectors);
        timeline.start(clock.now());

        let state = Rc::new(RefCell::new(SplashState {
            document: document.clone(),
            images: dom::query_in(&root, &selectors.splash_images),
            root: root.clone(),
            durable,
            timeline,
            clock,
            generation: 0,
        }));
        schedule(&state);

        let listeners = vec![
            EventListener::new(&root, "click", {
                let state = Rc::clone(&state);
                move |_| dismiss(&state, DismissTrigger::Click)
            }),
            EventListener::new(window, "keydown", {
                let state = Rc::clone(&state);
                move |event| {
                    let trigger = event
                        .dyn_ref::<KeyboardEvent>()
                        .and_then(|key| DismissTrigger::from_key(&key.key()));
                    if let Some(trigger) = trigger {
                        dismiss(&state, trigger);
                    }
                }
            }),
            EventListener::once(window, "wheel", {
                let state = Rc::clone(&state);
                move |_| dismiss(&state, DismissTrigger::Wheel)
            }),
            EventListener::once(window, "touchmove", {
                let state = Rc::clone(&state);
                move |_| dismiss(&state, DismissTrigger::Touch)
            }),
        ];

        tracing::info!("splash shown");
        Some(Self {
            state: Some(state),
            _listeners: listeners,
        })
    }

    pub(crate) fn status(&self) -> SplashStatus {
        if self.state.is_some() {
            SplashStatus::Shown
        } else {
            SplashStatus::Skipped
        }
    }
}

impl Drop for SplashBinding {
    fn drop(&mut self) {
        if let Some(state) = &self.state {
            state.borrow_mut().generation += 1;
        }
    }
}

fn apply_palette(root: &Element, palette: &SplashPalette, selectors: &folio_core::Selectors) {
    if let Some(background) = palette.background {
        dom::set_style(root, "background", background);
    }
    if let (Some(color), Some(title)) = (
        palette.title_color,
        dom::query_in(root, &selectors.splash_title),
    ) {
        dom::set_style(&title, "color", color);
    }
    if let (Some(color), Some(hint)) = (
        palette.hint_color,
        dom::query_in(root, &selectors.splash_hint),
    ) {
        dom::set_style(&hint, "color", color);
    }
}

fn dismiss(state: &Rc<RefCell<SplashState>>, trigger: DismissTrigger) {
    let effects = {
        let mut s = state.borrow_mut();
        let now = s.clock.now();
        s.timeline.dismiss(now, trigger)
    };
    if effects.is_empty() {
        return;
    }
    apply(&state.borrow(), &effects);
    schedule(state);
}

fn tick(state: &Rc<RefCell<SplashState>>, generation: u64) {
    let effects = {
        let mut s = state.borrow_mut();
        if s.generation != generation {
            return;
        }
        let now = s.clock.now();
        s.timeline.advance(now)
    };
    apply(&state.borrow(), &effects);
    schedule(state);
}

/// Arm one timer for the timeline's next deadline, superseding any earlier one.
fn schedule(state: &Rc<RefCell<SplashState>>) {
    let (deadline, now, generation) = {
        let mut s = state.borrow_mut();
        s.generation += 1;
        (s.timeline.next_deadline(), s.clock.now(), s.generation)
    };
    let Some(deadline) = deadline else {
        return;
    };
    let state = Rc::clone(state);
    Timeout::new(dom::millis_until(deadline, now), move || tick(&state, generation)).forget();
}

fn apply(state: &SplashState, effects: &[SplashEffect]) {
    for effect in effects {
        match effect {
            SplashEffect::AddLineClass => {
                if let Some(images) = &state.images {
                    dom::set_class(images, LINE_CLASS, true);
                }
            }
            SplashEffect::AddVisibleClass => dom::set_class(&state.root, VISIBLE_CLASS, true),
            SplashEffect::AddExitClass => dom::set_class(&state.root, EXIT_CLASS, true),
            SplashEffect::RemoveSplash => state.root.remove(),
            SplashEffect::ApplyBodyTheme(loaded) => {
                // The toggle may have been used while the splash was up.
                let theme = match state.durable.get(folio_core::keys::THEME) {
                    Some(stored) => Theme::from_stored(Some(&stored)),
                    None => *loaded,
                };
                dom::apply_body_theme(&state.document, theme);
            }
        }
    }
}

#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::SiteConfig;
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::carousel::{self, CarouselBinding};
use crate::dom::PageClock;
use crate::fade::{self, FadeBinding, ScrollFadeBinding};
use crate::logging;
use crate::nav::NavBinding;
use crate::overlay::OverlayBinding;
use crate::report::{AttachReport, SplashStatus};
use crate::splash::SplashBinding;
use crate::storage::WebStorage;
use crate::theme::ThemeBinding;

/// Everything bound to the current page. Dropping it detaches listeners and
/// disconnects observers.
struct Bindings {
    splash: Rc<RefCell<Option<SplashBinding>>>,
    _splash_on_load: Option<EventListener>,
    nav: Option<NavBinding>,
    _theme: Option<ThemeBinding>,
    fades: Vec<FadeBinding>,
    scroll_fade: Option<ScrollFadeBinding>,
    _overlay: Option<OverlayBinding>,
    _carousels: Vec<CarouselBinding>,
}

/// Client-side behavior layer for one page of the portfolio site.
///
/// Behavior units are independent: each one looks up its own elements and
/// silently stays inactive when they are missing.
#[wasm_bindgen]
pub struct FolioSite {
    bindings: Option<Bindings>,
    report: AttachReport,
}

#[wasm_bindgen]
impl FolioSite {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            bindings: None,
            report: AttachReport::default(),
        }
    }

    /// Bind every behavior present on the page.
    ///
    /// `config_json` is an optional JSON `SiteConfig`; omitted fields use the
    /// defaults that match the shipped markup. Calling `attach` again first
    /// tears down the previous bindings.
    pub fn attach(&mut self, config_json: Option<String>) -> Result<(), JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => {
                SiteConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => SiteConfig::default(),
        };
        logging::init(&config.log_level);
        self.destroy();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

        let clock = PageClock::new();
        let durable = WebStorage::local(&window);
        let session = WebStorage::session(&window);
        let selectors = &config.selectors;
        let mut report = AttachReport::default();

        let splash = Rc::new(RefCell::new(None));
        let splash_on_load = if document.get_element_by_id(&selectors.splash_id).is_none() {
            None
        } else if document.ready_state() == "complete" {
            let attached = SplashBinding::attach(
                &window,
                &document,
                Rc::clone(&durable),
                session.as_ref(),
                &config,
                clock,
            );
            if let Some(binding) = attached {
                report.splash = binding.status();
                *splash.borrow_mut() = Some(binding);
            }
            None
        } else {
            report.splash = SplashStatus::Pending;
            Some(defer_splash(
                &window,
                &document,
                &splash,
                Rc::clone(&durable),
                Rc::clone(&session),
                config.clone(),
                clock,
            ))
        };

        let nav = NavBinding::attach(
            &window,
            &document,
            &selectors.nav_links,
            &config.nav.index_document,
            Rc::clone(&session),
        );
        if let Some(nav) = &nav {
            report.nav_links = nav.len();
            report.active_nav = nav.active();
        }

        let theme = ThemeBinding::attach(
            &document,
            &selectors.theme_toggle_id,
            Rc::clone(&durable),
            clock,
        );
        report.theme_toggle = theme.is_some();

        let fades = fade::attach_groups(&document, selectors, &config.fade);
        report.fade_groups = fades.iter().map(|f| f.name().to_string()).collect();

        let scroll_fade = ScrollFadeBinding::attach(&window, &document, selectors, &config.fade);
        report.scroll_fade_elements = scroll_fade.as_ref().map_or(0, ScrollFadeBinding::len);

        let overlay = OverlayBinding::attach(&document, selectors);
        report.overlay = overlay.is_some();

        let (carousels, skipped) = carousel::attach_all(&document, selectors);
        report.carousels = carousels.len();
        report.carousels_skipped = skipped;

        tracing::info!(
            splash = ?report.splash,
            nav_links = report.nav_links,
            theme_toggle = report.theme_toggle,
            fade_groups = report.fade_groups.len(),
            carousels = report.carousels,
            carousels_skipped = report.carousels_skipped,
            "folio attached"
        );

        self.bindings = Some(Bindings {
            splash,
            _splash_on_load: splash_on_load,
            nav,
            _theme: theme,
            fades,
            scroll_fade,
            _overlay: overlay,
            _carousels: carousels,
        });
        self.report = report;
        Ok(())
    }

    /// JSON summary of what the last `attach` bound.
    pub fn report(&self) -> String {
        let mut report = self.report.clone();
        if let Some(bindings) = &self.bindings {
            if let Some(splash) = bindings.splash.borrow().as_ref() {
                report.splash = splash.status();
            }
            if let Some(nav) = &bindings.nav {
                report.active_nav = nav.active();
            }
            report.fade_groups = bindings.fades.iter().map(|f| f.name().to_string()).collect();
            report.scroll_fade_elements =
                bindings.scroll_fade.as_ref().map_or(0, ScrollFadeBinding::len);
        }
        report.to_json()
    }

    /// Explicit teardown for JS callers. Detaches every listener and observer.
    pub fn destroy(&mut self) {
        self.bindings = None;
        self.report = AttachReport::default();
    }
}

/// Run the splash load sequence when the window finishes loading.
fn defer_splash(
    window: &Window,
    document: &Document,
    slot: &Rc<RefCell<Option<SplashBinding>>>,
    durable: Rc<dyn folio_core::PreferenceStore>,
    session: Rc<dyn folio_core::PreferenceStore>,
    config: SiteConfig,
    clock: PageClock,
) -> EventListener {
    let slot = Rc::clone(slot);
    let handle = window.clone();
    let document = document.clone();
    EventListener::once(window, "load", move |_| {
        if let Some(binding) =
            SplashBinding::attach(&handle, &document, durable, session.as_ref(), &config, clock)
        {
            tracing::debug!(status = ?binding.status(), "deferred splash ran");
            *slot.borrow_mut() = Some(binding);
        }
    })
}

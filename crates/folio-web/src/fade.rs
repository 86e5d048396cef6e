//! Intersection fade groups and the detail-page scroll fader.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::fade::ACTIVE_CLASS;
use folio_core::{
    FadeConfig, FadeGroup, FadeKind, IntersectionFade, ScrollFader, Selectors, StyleUpdate,
};
use gloo::events::EventListener;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use crate::dom;

struct Observed {
    /// Elements handed to the observer; index is the group id.
    triggers: Vec<Element>,
    /// Elements toggled by each trigger.
    targets: Vec<Vec<Element>>,
    /// Element lit while any trigger is in view.
    shared: Option<Element>,
    group: FadeGroup,
}

impl Observed {
    fn on_entries(&mut self, entries: Array) {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let Some(id) = self.triggers.iter().position(|t| *t == target) else {
                continue;
            };
            let update = self
                .group
                .observe(id, entry.is_intersecting(), entry.intersection_ratio());
            for element in &self.targets[id] {
                dom::set_class(element, ACTIVE_CLASS, update.active);
            }
            if let Some(shared) = &self.shared {
                dom::set_class(shared, ACTIVE_CLASS, update.shared_active);
            }
        }
    }
}

/// One `IntersectionObserver` driving one [`FadeGroup`].
pub(crate) struct FadeBinding {
    name: &'static str,
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl FadeBinding {
    fn observe(
        name: &'static str,
        fade: IntersectionFade,
        triggers: Vec<Element>,
        targets: Vec<Vec<Element>>,
        shared: Option<Element>,
    ) -> Option<Self> {
        if triggers.is_empty() {
            return None;
        }
        let state = Rc::new(RefCell::new(Observed {
            triggers,
            targets,
            shared,
            group: FadeGroup::new(name, fade),
        }));

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new({
            let state = Rc::clone(&state);
            move |entries: Array, _observer: IntersectionObserver| {
                state.borrow_mut().on_entries(entries);
            }
        });
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(fade.threshold()));
        let created =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options);
        let observer = match created {
            Ok(observer) => observer,
            Err(err) => {
                tracing::warn!(group = name, error = ?err, "intersection observer unavailable");
                return None;
            }
        };
        for trigger in &state.borrow().triggers {
            observer.observe(trigger);
        }
        tracing::debug!(group = name, observed = state.borrow().triggers.len(), "fade group bound");

        Some(Self {
            name,
            observer,
            _callback: callback,
        })
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for FadeBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Bind the projects, exploratory, and about groups present on this page.
pub(crate) fn attach_groups(
    document: &Document,
    selectors: &Selectors,
    config: &FadeConfig,
) -> Vec<FadeBinding> {
    let fade = IntersectionFade::new(config.threshold);
    let mut bindings = Vec::new();

    if let Some(section) = dom::query(document, &selectors.projects_section) {
        let targets = dom::query_all(document, &selectors.projects_targets);
        bindings.extend(FadeBinding::observe("projects", fade, vec![section], vec![targets], None));
    }

    let items = dom::query_all(document, &selectors.exploratory_items);
    let item_targets = items
        .iter()
        .map(|item| {
            let mut targets = vec![item.clone()];
            targets.extend(dom::query_all_in(item, &selectors.exploratory_item_targets));
            targets
        })
        .collect();
    bindings.extend(FadeBinding::observe(
        "exploratory",
        fade,
        items,
        item_targets,
        dom::query(document, &selectors.exploratory_header),
    ));

    if dom::query(document, &selectors.about_roots).is_some() {
        let elements = dom::query_all(document, &selectors.about_targets);
        let targets = elements.iter().map(|el| vec![el.clone()]).collect();
        bindings.extend(FadeBinding::observe("about", fade, elements, targets, None));
    }

    bindings
}

struct ScrollState {
    window: Window,
    document: Document,
    elements: Vec<(Element, FadeKind)>,
    fader: ScrollFader,
}

impl ScrollState {
    fn render(&self) {
        let viewport_h = dom::viewport_height(&self.window);
        let theme = dom::body_theme(&self.document);
        for (element, kind) in &self.elements {
            let top = element.get_bounding_client_rect().top();
            match self.fader.style_for(*kind, theme, viewport_h, top) {
                StyleUpdate::Opacity(value) => dom::set_style(element, "opacity", &value),
                StyleUpdate::Color(value) => dom::set_style(element, "color", &value),
            }
        }
    }
}

/// Continuous scroll fade for project detail pages.
pub(crate) struct ScrollFadeBinding {
    len: usize,
    _listener: EventListener,
}

impl ScrollFadeBinding {
    /// Returns `None` unless the page is a project detail page.
    pub(crate) fn attach(
        window: &Window,
        document: &Document,
        selectors: &Selectors,
        config: &FadeConfig,
    ) -> Option<Self> {
        let page = dom::query(document, &selectors.project_page)?;
        let elements: Vec<(Element, FadeKind)> =
            dom::query_all_in(&page, &selectors.project_fade_targets)
                .into_iter()
                .filter_map(|el| {
                    let in_carousel = el.closest(&selectors.carousel).ok().flatten().is_some();
                    let kind = FadeKind::classify(&el.tag_name(), in_carousel)?;
                    Some((el, kind))
                })
                .collect();

        let state = Rc::new(ScrollState {
            window: window.clone(),
            document: document.clone(),
            elements,
            fader: ScrollFader::new(config),
        });
        // The page may already be scrolled when we attach.
        state.render();

        let len = state.elements.len();
        let listener = EventListener::new(window, "scroll", move |_| state.render());
        Some(Self {
            len,
            _listener: listener,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

//! Carousel binding: one independent controller per `.carousel` root.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::carousel::bind_parts;
use folio_core::{Carousel, Selectors, SwipeTracker};
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, TouchEvent};

use crate::dom;

struct CarouselState {
    id: usize,
    strip: Element,
    carousel: Carousel,
    swipe: SwipeTracker,
}

impl CarouselState {
    fn render(&self) {
        dom::set_style(&self.strip, "transform", &self.carousel.translate());
        tracing::debug!(
            carousel = self.id,
            slide = self.carousel.index() + 1,
            of = self.carousel.len(),
            "carousel moved"
        );
    }
}

pub(crate) struct CarouselBinding {
    _listeners: Vec<EventListener>,
}

/// Bind every carousel on the page. Returns the bound instances and the
/// number skipped for missing parts.
pub(crate) fn attach_all(
    document: &Document,
    selectors: &Selectors,
) -> (Vec<CarouselBinding>, usize) {
    let roots = dom::query_all(document, &selectors.carousel);
    tracing::debug!(found = roots.len(), "binding carousels");

    let mut bound = Vec::with_capacity(roots.len());
    let mut skipped = 0;
    for (id, root) in roots.iter().enumerate() {
        match CarouselBinding::attach(id, root, selectors) {
            Some(binding) => bound.push(binding),
            None => skipped += 1,
        }
    }
    (bound, skipped)
}

fn first_touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_x()))
}

impl CarouselBinding {
    fn attach(id: usize, root: &Element, selectors: &Selectors) -> Option<Self> {
        let (strip, prev, next) = bind_parts(
            id,
            dom::query_in(root, &selectors.carousel_strip),
            dom::query_in(root, &selectors.carousel_prev),
            dom::query_in(root, &selectors.carousel_next),
        )
        .ok()?;

        let slides = strip.child_element_count() as usize;
        let state = Rc::new(RefCell::new(CarouselState {
            id,
            strip,
            carousel: Carousel::new(slides),
            swipe: SwipeTracker::new(),
        }));
        state.borrow().render();

        let button = |target: &Element, forward: bool| {
            let state = Rc::clone(&state);
            EventListener::new_with_options(
                target,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    event.stop_propagation();
                    let mut s = state.borrow_mut();
                    if forward {
                        s.carousel.next();
                    } else {
                        s.carousel.prev();
                    }
                    s.render();
                },
            )
        };

        let listeners = vec![
            button(&prev, false),
            button(&next, true),
            EventListener::new(root, "touchstart", {
                let state = Rc::clone(&state);
                move |event| {
                    if let Some(x) = first_touch_x(event) {
                        state.borrow_mut().swipe.start(x);
                    }
                }
            }),
            EventListener::new(root, "touchend", {
                let state = Rc::clone(&state);
                move |event| {
                    let Some(x) = first_touch_x(event) else {
                        return;
                    };
                    let mut s = state.borrow_mut();
                    if let Some(direction) = s.swipe.end(x) {
                        s.carousel.swipe(direction);
                        s.render();
                    }
                }
            }),
            EventListener::new(root, "touchcancel", {
                let state = Rc::clone(&state);
                move |_| state.borrow_mut().swipe.cancel()
            }),
        ];

        tracing::info!(carousel = id, slides, "carousel initialized");
        Some(Self {
            _listeners: listeners,
        })
    }
}

//! Expandable-image overlay binding.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Overlay, Selectors};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement};

use crate::dom;

struct OverlayView {
    container: Element,
    image: HtmlImageElement,
    state: Overlay,
}

impl OverlayView {
    fn render(&self) {
        dom::set_style(&self.container, "display", self.state.display());
        if let Some(src) = self.state.src() {
            self.image.set_src(src);
        }
    }
}

pub(crate) struct OverlayBinding {
    _listeners: Vec<EventListener>,
}

impl OverlayBinding {
    /// Returns `None` unless both the overlay and its image element exist.
    pub(crate) fn attach(document: &Document, selectors: &Selectors) -> Option<Self> {
        let container = document.get_element_by_id(&selectors.overlay_id)?;
        let image = document
            .get_element_by_id(&selectors.overlay_image_id)?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        let view = Rc::new(RefCell::new(OverlayView {
            container: container.clone(),
            image,
            state: Overlay::default(),
        }));

        let thumbs = dom::query_all(document, &selectors.expandable_images);
        let mut listeners: Vec<EventListener> = thumbs
            .into_iter()
            .map(|thumb| {
                let view = Rc::clone(&view);
                let target = thumb.clone();
                EventListener::new(&target, "click", move |_| {
                    let src = thumb
                        .dyn_ref::<HtmlImageElement>()
                        .map(HtmlImageElement::src)
                        .or_else(|| thumb.get_attribute("src"))
                        .unwrap_or_default();
                    let mut v = view.borrow_mut();
                    v.state.show(src);
                    v.render();
                })
            })
            .collect();

        listeners.push(EventListener::new(&container, "click", move |_| {
            let mut v = view.borrow_mut();
            v.state.hide();
            v.render();
        }));

        Some(Self {
            _listeners: listeners,
        })
    }
}

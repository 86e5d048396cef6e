//! Small DOM helpers. Every write tolerates detached or missing elements.

use std::time::Duration;

use folio_core::Theme;
use folio_core::theme::LIGHT_MODE_CLASS;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};
use web_time::Instant;

/// Page-relative monotonic clock shared by every binding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageClock {
    origin: Instant,
}

impl PageClock {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub(crate) fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First document element matching `selector`. Invalid selectors match nothing.
pub(crate) fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub(crate) fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(crate) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

pub(crate) fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub(crate) fn body(document: &Document) -> Option<HtmlElement> {
    document.body()
}

/// Reflect `theme` onto the body's light-mode marker.
pub(crate) fn apply_body_theme(document: &Document, theme: Theme) {
    if let Some(body) = body(document) {
        set_class(&body, LIGHT_MODE_CLASS, theme.is_light());
    }
}

pub(crate) fn body_theme(document: &Document) -> Theme {
    let light = body(document).is_some_and(|b| b.class_list().contains(LIGHT_MODE_CLASS));
    if light { Theme::Light } else { Theme::Dark }
}

pub(crate) fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub(crate) fn millis_until(deadline: Duration, now: Duration) -> u32 {
    let ms = deadline.saturating_sub(now).as_millis();
    u32::try_from(ms).unwrap_or(u32::MAX)
}

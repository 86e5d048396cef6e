//! Navigation highlight binding.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::nav::ACTIVE_CLASS;
use folio_core::{NavHighlighter, PreferenceStore};
use gloo::events::EventListener;
use web_sys::{Document, Element, Window};

use crate::dom;

pub(crate) struct NavBinding {
    highlighter: Rc<RefCell<NavHighlighter>>,
    _listeners: Vec<EventListener>,
}

impl NavBinding {
    /// Returns `None` when the page has no nav links.
    pub(crate) fn attach(
        window: &Window,
        document: &Document,
        selector: &str,
        index_document: &str,
        session: Rc<dyn PreferenceStore>,
    ) -> Option<Self> {
        let links = Rc::new(dom::query_all(document, selector));
        if links.is_empty() {
            return None;
        }

        let path = window.location().pathname().unwrap_or_default();
        let hrefs: Vec<String> = links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect();
        let highlighter =
            NavHighlighter::new(&path, hrefs.iter().map(String::as_str), index_document);
        render(&links, &highlighter);
        let highlighter = Rc::new(RefCell::new(highlighter));

        let listeners = links
            .iter()
            .enumerate()
            .map(|(index, link)| {
                let links = Rc::clone(&links);
                let highlighter = Rc::clone(&highlighter);
                let session = Rc::clone(&session);
                EventListener::new(link, "click", move |_| {
                    let mut h = highlighter.borrow_mut();
                    h.click(index, session.as_ref());
                    render(&links, &h);
                })
            })
            .collect();

        Some(Self {
            highlighter,
            _listeners: listeners,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.highlighter.borrow().len()
    }

    pub(crate) fn active(&self) -> Option<usize> {
        self.highlighter.borrow().active()
    }
}

fn render(links: &[Element], highlighter: &NavHighlighter) {
    for (link, active) in links.iter().zip(highlighter.states()) {
        dom::set_class(link, ACTIVE_CLASS, active);
    }
}

//! Theme toggle binding.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{PreferenceStore, TapInput, Theme, ThemeToggle};
use gloo::events::{EventListener, EventListenerOptions};
use web_sys::{Document, Element, Event};

use crate::dom::{self, PageClock};

struct ToggleState {
    document: Document,
    control: Element,
    toggle: ThemeToggle,
    durable: Rc<dyn PreferenceStore>,
    clock: PageClock,
}

pub(crate) struct ThemeBinding {
    _listeners: Vec<EventListener>,
}

impl ThemeBinding {
    /// Returns `None` when the page has no toggle control.
    pub(crate) fn attach(
        document: &Document,
        control_id: &str,
        durable: Rc<dyn PreferenceStore>,
        clock: PageClock,
    ) -> Option<Self> {
        let control = document.get_element_by_id(control_id)?;
        let toggle = ThemeToggle::load(durable.as_ref());
        if toggle.theme().is_light() {
            dom::apply_body_theme(document, Theme::Light);
        }
        control.set_inner_html(&toggle.theme().icon_html());

        dom::set_style(&control, "cursor", "pointer");
        dom::set_style(&control, "user-select", "none");
        dom::set_style(&control, "-webkit-tap-highlight-color", "transparent");
        dom::set_style(&control, "touch-action", "manipulation");

        let state = Rc::new(RefCell::new(ToggleState {
            document: document.clone(),
            control: control.clone(),
            toggle,
            durable,
            clock,
        }));

        let listen = |name: &'static str, input: TapInput| {
            let state = Rc::clone(&state);
            EventListener::new_with_options(
                &control,
                name,
                EventListenerOptions::enable_prevent_default(),
                move |event| handle(&state, input, event),
            )
        };
        let listeners = vec![
            listen("mousedown", TapInput::MouseDown),
            listen("touchend", TapInput::TouchEnd),
            listen("click", TapInput::Click),
        ];

        tracing::debug!(
            theme = state.borrow().toggle.theme().as_stored(),
            "theme toggle bound"
        );
        Some(Self {
            _listeners: listeners,
        })
    }
}

fn handle(state: &Rc<RefCell<ToggleState>>, input: TapInput, event: &Event) {
    event.prevent_default();
    event.stop_propagation();

    let mut s = state.borrow_mut();
    let now = s.clock.now();
    let ToggleState {
        document,
        control,
        toggle,
        durable,
        ..
    } = &mut *s;
    if let Some(theme) = toggle.handle(input, now, durable.as_ref()) {
        dom::apply_body_theme(document, theme);
        control.set_inner_html(&theme.icon_html());
    }
}

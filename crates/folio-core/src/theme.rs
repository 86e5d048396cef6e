//! Light/dark theme preference and the toggle control's input handling.

use std::time::Duration;

use crate::prefs::{PreferenceStore, keys};

/// Body class marking light mode. Dark is the unmarked default.
pub const LIGHT_MODE_CLASS: &str = "light-mode";

/// How long after a touch a synthesized `mousedown` belongs to the same tap.
pub const GESTURE_WINDOW: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Decode a stored value. Anything other than `"light"` is dark.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self::from_stored(store.get(keys::THEME).as_deref())
    }

    #[must_use]
    pub const fn as_stored(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }

    /// Font Awesome icon shown on the toggle: the theme you would switch *to*.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fa-moon",
            Self::Dark => "fa-sun",
        }
    }

    /// Inner markup for the toggle control.
    #[must_use]
    pub fn icon_html(self) -> String {
        format!(r#"<i class="fas {}"></i>"#, self.icon_class())
    }

    /// Base RGB used for text tinting under this theme.
    #[must_use]
    pub const fn text_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Light => (0, 0, 0),
            Self::Dark => (255, 255, 255),
        }
    }
}

/// Raw pointer-ish inputs the toggle control receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapInput {
    TouchEnd,
    MouseDown,
    Click,
}

/// Collapses the event burst of one physical gesture into one toggle.
///
/// A tap on a touch screen fires `touchend`, then (unless suppressed) a
/// synthesized `mousedown` and `click`. A mouse press fires `mousedown` then
/// `click` on release, however long the button is held. Keyboard activation
/// fires only `click`.
///
/// The press that flipped leaves a pending marker; the next `click` is its
/// release and is swallowed. A `click` with no pending press is a keyboard
/// activation and flips on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapGuard {
    last_touch: Option<Duration>,
    pending_press: bool,
}

impl TapGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_touch: None,
            pending_press: false,
        }
    }

    /// Returns true when this input should flip the theme.
    pub fn accept(&mut self, input: TapInput, now: Duration) -> bool {
        match input {
            TapInput::TouchEnd => {
                self.last_touch = Some(now);
                self.pending_press = true;
                true
            }
            TapInput::MouseDown => {
                let synthesized = self
                    .last_touch
                    .is_some_and(|t| now >= t && now - t <= GESTURE_WINDOW);
                if synthesized {
                    return false;
                }
                self.pending_press = true;
                true
            }
            TapInput::Click => !std::mem::take(&mut self.pending_press),
        }
    }
}

/// The theme toggle control's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeToggle {
    theme: Theme,
    guard: TapGuard,
}

impl ThemeToggle {
    /// Read the persisted preference.
    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self {
            theme: Theme::load(store),
            guard: TapGuard::new(),
        }
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip and persist. A rejected write keeps the flip for this page.
    pub fn flip(&mut self, store: &dyn PreferenceStore) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(err) = store.set(keys::THEME, self.theme.as_stored()) {
            tracing::warn!(store = store.name(), error = %err, "failed to persist theme");
        }
        tracing::debug!(theme = self.theme.as_stored(), "theme toggled");
        self.theme
    }

    /// Route a raw input through the gesture guard; flips at most once per gesture.
    pub fn handle(
        &mut self,
        input: TapInput,
        now: Duration,
        store: &dyn PreferenceStore,
    ) -> Option<Theme> {
        if self.guard.accept(input, now) {
            Some(self.flip(store))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn stored_values() {
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("LIGHT")), Theme::Dark);
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn icon_matches_theme() {
        assert_eq!(Theme::Light.icon_html(), r#"<i class="fas fa-moon"></i>"#);
        assert_eq!(Theme::Dark.icon_html(), r#"<i class="fas fa-sun"></i>"#);
    }

    #[test]
    fn flip_persists() {
        let store = MemoryStore::new();
        let mut toggle = ThemeToggle::load(&store);
        assert_eq!(toggle.flip(&store), Theme::Light);
        assert_eq!(store.get(keys::THEME).as_deref(), Some("light"));
        assert_eq!(toggle.flip(&store), Theme::Dark);
        assert_eq!(store.get(keys::THEME).as_deref(), Some("dark"));
    }

    #[test]
    fn touch_tap_flips_once() {
        let store = MemoryStore::new();
        let mut toggle = ThemeToggle::load(&store);
        assert_eq!(toggle.handle(TapInput::TouchEnd, ms(100), &store), Some(Theme::Light));
        assert_eq!(toggle.handle(TapInput::MouseDown, ms(400), &store), None);
        assert_eq!(toggle.handle(TapInput::Click, ms(410), &store), None);
        assert_eq!(toggle.theme(), Theme::Light);
    }

    #[test]
    fn mouse_press_flips_once() {
        let store = MemoryStore::new();
        let mut toggle = ThemeToggle::load(&store);
        assert_eq!(toggle.handle(TapInput::MouseDown, ms(0), &store), Some(Theme::Light));
        assert_eq!(toggle.handle(TapInput::Click, ms(120), &store), None);
        assert_eq!(toggle.handle(TapInput::MouseDown, ms(2_000), &store), Some(Theme::Dark));
        assert_eq!(toggle.handle(TapInput::Click, ms(2_100), &store), None);
    }

    #[test]
    fn keyboard_click_flips() {
        let store = MemoryStore::new();
        let mut toggle = ThemeToggle::load(&store);
        assert_eq!(toggle.handle(TapInput::Click, ms(0), &store), Some(Theme::Light));
        assert_eq!(toggle.handle(TapInput::Click, ms(50), &store), Some(Theme::Dark));
    }

    #[test]
    fn long_held_press_flips_once() {
        let store = MemoryStore::new();
        let mut toggle = ThemeToggle::load(&store);
        assert_eq!(toggle.handle(TapInput::MouseDown, ms(0), &store), Some(Theme::Light));
        assert_eq!(toggle.handle(TapInput::Click, ms(1_000), &store), None);
        assert_eq!(toggle.theme(), Theme::Light);
    }

    #[test]
    fn keyboard_click_after_mouse_gesture_flips() {
        let mut guard = TapGuard::new();
        assert!(guard.accept(TapInput::MouseDown, ms(0)));
        assert!(!guard.accept(TapInput::Click, ms(5_000)));
        assert!(guard.accept(TapInput::Click, ms(5_100)));
    }

    #[test]
    fn second_touch_is_a_new_gesture() {
        let mut guard = TapGuard::new();
        assert!(guard.accept(TapInput::TouchEnd, ms(0)));
        assert!(guard.accept(TapInput::TouchEnd, ms(200)));
    }
}

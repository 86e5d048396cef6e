//! Property-based invariant tests for folio-core.
//!
//! Verifies:
//! 1. Carousel: `next()` applied N times returns to the starting index
//! 2. Carousel: `prev()` then `next()` is the identity
//! 3. Carousel: index always stays below the slide count
//! 4. Swipe: travel of at least the threshold yields exactly one index change
//! 5. Swipe: travel under the threshold never changes the index
//! 6. Splash: show iff (v == 0 || v % 10 == 0 || external), unless nav-suppressed
//! 7. Splash: every load increments the stored counter by exactly one
//! 8. Opacity: factor always within [min, 1]
//! 9. Theme: a touch or mouse gesture's event burst flips exactly once, however
//!    long the press is held
//! 10. Fade: active state after any entry sequence equals the last entry

use std::time::Duration;

use folio_core::carousel::{Carousel, SwipeTracker};
use folio_core::fade::{FadeGroup, IntersectionFade, scroll_opacity};
use folio_core::prefs::{MemoryStore, PreferenceStore, keys};
use folio_core::splash::{SplashController, SplashDecision};
use folio_core::theme::{TapGuard, TapInput};
use folio_core::SplashConfig;
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_steps() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 0..64)
}

fn arb_referrer() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("https://example.com/work.html".to_string())),
        Just(Some("https://news.ycombinator.com/item?id=1".to_string())),
    ]
}

proptest! {
    #[test]
    fn next_n_times_is_identity(len in 1usize..64, start_steps in 0usize..64) {
        let mut c = Carousel::new(len);
        for _ in 0..start_steps {
            c.next();
        }
        let origin = c.index();
        for _ in 0..len {
            c.next();
        }
        prop_assert_eq!(c.index(), origin);
    }

    #[test]
    fn prev_then_next_is_identity(len in 1usize..64, steps in arb_steps()) {
        let mut c = Carousel::new(len);
        for forward in steps {
            if forward { c.next(); } else { c.prev(); }
        }
        let origin = c.index();
        c.prev();
        c.next();
        prop_assert_eq!(c.index(), origin);
    }

    #[test]
    fn index_stays_in_range(len in 0usize..32, steps in arb_steps()) {
        let mut c = Carousel::new(len);
        for forward in steps {
            let i = if forward { c.next() } else { c.prev() };
            prop_assert!((len == 0 && i == 0) || i < len);
        }
    }

    #[test]
    fn long_swipe_changes_index_once(
        len in 2usize..16,
        start in -500.0f64..500.0,
        travel in 50.5f64..400.0,
        leftward in any::<bool>(),
    ) {
        let mut c = Carousel::new(len);
        let mut t = SwipeTracker::default();
        t.start(start);
        let end = if leftward { start - travel } else { start + travel };
        let dir = t.end(end);
        prop_assert!(dir.is_some());
        let after = c.swipe(dir.unwrap());
        let expected = if leftward { 1 } else { len - 1 };
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn short_swipe_is_noop(start in -500.0f64..500.0, travel in -49.9f64..49.9) {
        let mut t = SwipeTracker::default();
        t.start(start);
        prop_assert_eq!(t.end(start + travel), None);
    }

    #[test]
    fn splash_decision_formula(
        visits in 0u64..10_000,
        referrer in arb_referrer(),
        nav in any::<bool>(),
    ) {
        let d = SplashDecision::evaluate(visits, 10, referrer.as_deref(), "example.com", nav);
        let external = referrer.as_deref().is_some_and(|r| r.contains("ycombinator"));
        let expected = !nav && (visits == 0 || visits % 10 == 0 || external);
        prop_assert_eq!(d.show(), expected);
    }

    #[test]
    fn every_load_increments_once(visits in 0u64..1_000_000, nav in any::<bool>()) {
        let stored = visits.to_string();
        let durable = MemoryStore::with_entries([(keys::VISIT_COUNT, stored.as_str())]);
        let session = if nav {
            MemoryStore::with_entries([(keys::NAV_CLICK, "true")])
        } else {
            MemoryStore::new()
        };
        let plan = SplashController::on_load(
            &durable, &session, None, "example.com", &SplashConfig::default(),
        );
        prop_assert_eq!(plan.decision().previous_visits, visits);
        let next = (visits + 1).to_string();
        prop_assert_eq!(durable.get(keys::VISIT_COUNT), Some(next));
    }

    #[test]
    fn opacity_is_bounded(
        h in -100.0f64..4_000.0,
        top in -10_000.0f64..10_000.0,
        min in 0.0f64..=1.0,
    ) {
        let f = scroll_opacity(h, top, 150.0, min);
        prop_assert!(f <= 1.0);
        prop_assert!(f >= min);
    }

    #[test]
    fn one_flip_per_touch_gesture(mouse_at in 0u64..400, click_gap in 0u64..400) {
        let mut guard = TapGuard::new();
        let base = Duration::from_secs(10);
        let mouse = base + Duration::from_millis(mouse_at);
        let click = mouse + Duration::from_millis(click_gap);
        let flips = u32::from(guard.accept(TapInput::TouchEnd, base))
            + u32::from(guard.accept(TapInput::MouseDown, mouse))
            + u32::from(guard.accept(TapInput::Click, click));
        prop_assert_eq!(flips, 1);
    }

    #[test]
    fn one_flip_per_mouse_press(start in 0u64..100_000, hold in 0u64..60_000) {
        let mut guard = TapGuard::new();
        let down = Duration::from_millis(start);
        let up = down + Duration::from_millis(hold);
        let flips = u32::from(guard.accept(TapInput::MouseDown, down))
            + u32::from(guard.accept(TapInput::Click, up));
        prop_assert_eq!(flips, 1);
    }

    #[test]
    fn fade_state_follows_last_entry(
        entries in proptest::collection::vec((0usize..4, any::<bool>(), 0.0f64..=1.0), 1..40),
    ) {
        let mut group = FadeGroup::new("test", IntersectionFade::new(0.3));
        let mut last = [false; 4];
        for (id, hit, ratio) in entries {
            let update = group.observe(id, hit, ratio);
            last[id] = update.active;
            prop_assert_eq!(update.shared_active, last.iter().any(|a| *a));
        }
        for (id, active) in last.iter().enumerate() {
            prop_assert_eq!(group.is_active(id), *active);
        }
    }
}

#[test]
fn nav_flag_store_is_session_only() {
    let durable = MemoryStore::new();
    let session = MemoryStore::with_entries([(keys::NAV_CLICK, "true")]);
    let config = SplashConfig::default();
    let plan = SplashController::on_load(&durable, &session, None, "example.com", &config);
    assert!(!plan.decision().show());
    assert_eq!(durable.get(keys::NAV_CLICK), None);
    assert_eq!(session.get(keys::NAV_CLICK), None);
}

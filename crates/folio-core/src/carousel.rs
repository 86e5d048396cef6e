//! Per-instance image carousel: circular index and swipe classification.
//!
//! Each carousel on a page owns its own [`Carousel`] and [`SwipeTracker`];
//! instances never share state.

use std::fmt;

/// Horizontal travel, in px, a touch must cover to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Required child element of a carousel root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselPart {
    Strip,
    Prev,
    Next,
}

impl CarouselPart {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strip => "strip",
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

impl fmt::Display for CarouselPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors binding a behavior to its DOM elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A carousel root lacks one of its required children.
    MissingCarouselPart { carousel: usize, part: CarouselPart },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::MissingCarouselPart { carousel, part } => {
                write!(f, "carousel {carousel}: missing {part} element")
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Resolve the three required children of carousel `carousel`.
///
/// Parts are checked in `strip`, `prev`, `next` order; the first missing one
/// is logged and returned. The caller skips only this instance.
pub fn bind_parts<T>(
    carousel: usize,
    strip: Option<T>,
    prev: Option<T>,
    next: Option<T>,
) -> Result<(T, T, T), BindError> {
    let missing = |part| {
        let err = BindError::MissingCarouselPart { carousel, part };
        tracing::error!(carousel, part = %part, "{err}; skipping instance");
        err
    };
    let strip = strip.ok_or_else(|| missing(CarouselPart::Strip))?;
    let prev = prev.ok_or_else(|| missing(CarouselPart::Prev))?;
    let next = next.ok_or_else(|| missing(CarouselPart::Next))?;
    Ok((strip, prev, next))
}

/// Circular slide index over a fixed slide count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    /// Start at the first slide. `len` is fixed for the instance's lifetime.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Advance one slide, wrapping past the end. No-op without slides.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Step back one slide, wrapping before the start. No-op without slides.
    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Apply a classified swipe.
    pub fn swipe(&mut self, direction: SwipeDirection) -> usize {
        match direction {
            SwipeDirection::Left => self.next(),
            SwipeDirection::Right => self.prev(),
        }
    }

    /// CSS transform placing the current slide in view.
    #[must_use]
    pub fn translate(&self) -> String {
        if self.index == 0 {
            return "translateX(0%)".to_string();
        }
        format!("translateX(-{}%)", self.index * 100)
    }
}

/// Finger travel direction. Left means content moves toward the next slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Tracks one touch from start to end along the x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { start_x: None }
    }

    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the touch. Travel of at least [`SWIPE_THRESHOLD_PX`] is a swipe.
    ///
    /// An end without a matching start is ignored.
    pub fn end(&mut self, x: f64) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta <= -SWIPE_THRESHOLD_PX {
            Some(SwipeDirection::Left)
        } else if delta >= SWIPE_THRESHOLD_PX {
            Some(SwipeDirection::Right)
        } else {
            None
        }
    }

    /// Abandon the touch in progress (`touchcancel`).
    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

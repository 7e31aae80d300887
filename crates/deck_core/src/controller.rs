use std::time::Duration;

use tracing::warn;

use crate::{deck::Deck, error::DeckError, intent::NavIntent};

/// Minimum horizontal displacement (px-equivalent units) for a touch swipe
/// to register as an intentional navigation gesture.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Quiet period after the last scroll event before the scroll position is
/// allowed to drive the current-slide index.
pub const SCROLL_SETTLE: Duration = Duration::from_millis(100);

/// Duration of the cosmetic scale pulse accompanying a programmatic scroll.
pub const SCROLL_PULSE: Duration = Duration::from_millis(300);

/// Rendering seam. Hosts implement this against their own display; the
/// controller calls it during [`SlideController::synchronize`] and when a
/// navigation intent asks for a scroll transition.
///
/// All methods are best-effort: a host missing an optional element simply
/// ignores the call.
pub trait Surface {
    /// Progress indicator, as a percentage in `(0, 100]`.
    fn set_progress(&mut self, percent: f32);
    /// Ordinal label for one slide, e.g. `"3 / 12"`.
    fn set_page_label(&mut self, slide: usize, label: &str);
    /// Visually distinguish `slide` from all others.
    fn set_highlight(&mut self, slide: usize);
    /// Mark `slide` as the current page for assistive navigation; every
    /// other slide leaves the tab order.
    fn set_focus(&mut self, slide: usize);
    /// Session title carrying the current position.
    fn set_title(&mut self, title: &str);
    /// Smooth-scroll the view to `slide`, with a transient pulse.
    fn scroll_to(&mut self, slide: usize);
}

/// Owns the current-slide index and keeps all derived view state consistent
/// with it. Constructed once per presentation view; the deck length is fixed
/// for its lifetime.
pub struct SlideController<S: Surface> {
    deck: Deck,
    surface: S,
    index: usize,
}

impl<S: Surface> SlideController<S> {
    /// Initializes the session: index starts at 0 and one full synchronization
    /// pass runs before any input is processed. A deck with zero slides logs
    /// a warning and refuses to initialize, leaving navigation unwired.
    pub fn initialize(deck: Deck, surface: S) -> Result<Self, DeckError> {
        if deck.is_empty() {
            warn!("no slides found; slide navigation stays unwired");
            return Err(DeckError::EmptyDeck);
        }
        let mut controller = Self {
            deck,
            surface,
            index: 0,
        };
        controller.synchronize();
        Ok(controller)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.deck.len()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn progress_percent(&self) -> f32 {
        (self.index + 1) as f32 / self.total() as f32 * 100.0
    }

    /// Single consumption point for the input channels.
    pub fn apply(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::Advance => self.advance(),
            NavIntent::Retreat => self.retreat(),
            NavIntent::First => self.go_to(0),
            NavIntent::Last => self.go_to(self.total() - 1),
            NavIntent::JumpTo(index) => self.go_to(index),
            NavIntent::Swipe { delta_x } => self.on_swipe(delta_x),
            NavIntent::ScrollSettled { offset, viewport } => {
                self.on_scroll_settled(offset, viewport)
            }
        }
    }

    /// Moves to `index`, requesting a scroll transition. Silent no-op when
    /// out of bounds or already current.
    pub fn go_to(&mut self, index: usize) {
        if index >= self.total() || index == self.index {
            return;
        }
        self.index = index;
        self.surface.scroll_to(index);
        self.synchronize();
    }

    /// Next slide; no wraparound at the last one.
    pub fn advance(&mut self) {
        if self.index + 1 < self.total() {
            self.go_to(self.index + 1);
        }
    }

    /// Previous slide; no wraparound at the first one.
    pub fn retreat(&mut self) {
        if self.index > 0 {
            self.go_to(self.index - 1);
        }
    }

    /// Adopts the slide nearest the settled scroll position. The scroll has
    /// already happened, so no `scroll_to` is issued.
    pub fn on_scroll_settled(&mut self, offset: f32, viewport: f32) {
        if viewport <= 0.0 {
            return;
        }
        let nearest = (offset / viewport).round();
        if nearest < 0.0 {
            return;
        }
        let nearest = nearest as usize;
        if nearest != self.index && nearest < self.total() {
            self.index = nearest;
            self.synchronize();
        }
    }

    /// Positive displacement advances, negative retreats; below the
    /// threshold the gesture is ignored.
    pub fn on_swipe(&mut self, delta_x: f32) {
        if delta_x.abs() <= SWIPE_THRESHOLD {
            return;
        }
        if delta_x > 0.0 {
            self.advance();
        } else {
            self.retreat();
        }
    }

    /// Idempotent re-render of every derived view concern.
    pub fn synchronize(&mut self) {
        let total = self.total();
        self.surface.set_progress(self.progress_percent());
        for i in 0..total {
            self.surface
                .set_page_label(i, &format!("{} / {}", i + 1, total));
        }
        self.surface.set_highlight(self.index);
        self.surface.set_focus(self.index);
        let title = self
            .deck
            .get(self.index)
            .map(|slide| slide.title.as_str())
            .unwrap_or("Deck");
        self.surface
            .set_title(&format!("{} ({}/{})", title, self.index + 1, total));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

//! Slide deck model and presentation controller.
//!
//! The controller owns the single authoritative current-slide index and keeps
//! every derived view concern (progress, page labels, highlight, focus,
//! window title) consistent with it through the [`Surface`] seam. Rendering
//! hosts implement `Surface`; the controller never touches a rendering API.

pub mod controller;
pub mod debounce;
pub mod deck;
pub mod error;
pub mod intent;

pub use controller::{SlideController, Surface, SCROLL_PULSE, SCROLL_SETTLE, SWIPE_THRESHOLD};
pub use debounce::Debounce;
pub use deck::{Deck, Slide};
pub use error::DeckError;
pub use intent::{intent_for_key, NavIntent, NavKey};

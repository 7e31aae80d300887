//! Navigation intents published by the input channels.
//!
//! Each input surface (keyboard, pointer click, scroll, swipe) translates its
//! raw events into one of these messages; the controller consumes them
//! sequentially on the UI loop.

/// A discrete navigation request. `Swipe` and `ScrollSettled` carry raw
/// measurements; the controller applies the threshold and rounding rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavIntent {
    Advance,
    Retreat,
    First,
    Last,
    JumpTo(usize),
    Swipe { delta_x: f32 },
    ScrollSettled { offset: f32, viewport: f32 },
}

/// The keyboard surface recognized by the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Right,
    Left,
    Space,
    Home,
    End,
}

/// Maps a navigation key to its intent. Returns `None` while a text-input
/// control owns focus so normal typing is never hijacked.
pub fn intent_for_key(key: NavKey, typing: bool) -> Option<NavIntent> {
    if typing {
        return None;
    }
    Some(match key {
        NavKey::Right | NavKey::Space => NavIntent::Advance,
        NavKey::Left => NavIntent::Retreat,
        NavKey::Home => NavIntent::First,
        NavKey::End => NavIntent::Last,
    })
}

#[cfg(test)]
#[path = "tests/intent_tests.rs"]
mod tests;

//! Maps raw terminal events onto navigation intents and view actions.
//!
//! Four input channels feed the controller: keyboard, pointer click on a
//! slide row, mouse-wheel scrolling (debounced upstream), and a horizontal
//! drag standing in for a touch swipe.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use deck_core::{intent_for_key, NavIntent, NavKey};

use crate::ui::ListGeometry;

/// Rows of virtual scroll per wheel notch.
pub const WHEEL_STEP_ROWS: f32 = 3.0;

/// One terminal cell of horizontal drag counts as this many px-equivalent
/// swipe units, so a six-column drag clears the 50-unit swipe threshold.
pub const DRAG_UNITS_PER_CELL: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Nothing,
    Quit,
    Intent(NavIntent),
    ScrollBy(f32),
    BeginJumpPrompt,
    PromptChar(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
}

/// Tracks the in-flight pointer press so release events can be classified as
/// a click (same cell) or a swipe (horizontal displacement).
#[derive(Debug, Default)]
pub struct PointerTracker {
    press: Option<(u16, u16)>,
}

impl PointerTracker {
    pub fn action_for_event(
        &mut self,
        event: Event,
        typing: bool,
        list: ListGeometry,
    ) -> InputAction {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                key_action(key.code, typing)
            }
            Event::Mouse(mouse) => self.mouse_action(mouse, list),
            _ => InputAction::Nothing,
        }
    }

    fn mouse_action(&mut self, mouse: MouseEvent, list: ListGeometry) -> InputAction {
        match mouse.kind {
            MouseEventKind::ScrollDown => InputAction::ScrollBy(WHEEL_STEP_ROWS),
            MouseEventKind::ScrollUp => InputAction::ScrollBy(-WHEEL_STEP_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some((mouse.column, mouse.row));
                InputAction::Nothing
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some((press_col, press_row)) = self.press.take() else {
                    return InputAction::Nothing;
                };
                if press_col == mouse.column && press_row == mouse.row {
                    return slide_row_at(list, mouse.column, mouse.row)
                        .map(|index| InputAction::Intent(NavIntent::JumpTo(index)))
                        .unwrap_or(InputAction::Nothing);
                }
                // Drag: start minus end, so a leftward drag is positive and
                // advances, matching the touch-swipe convention.
                let delta_x = (f32::from(press_col) - f32::from(mouse.column))
                    * DRAG_UNITS_PER_CELL;
                InputAction::Intent(NavIntent::Swipe { delta_x })
            }
            _ => InputAction::Nothing,
        }
    }
}

fn key_action(code: KeyCode, typing: bool) -> InputAction {
    if let Some(nav) = nav_key(code) {
        return match intent_for_key(nav, typing) {
            Some(intent) => InputAction::Intent(intent),
            // Suppressed while the jump prompt owns focus.
            None => prompt_key(code),
        };
    }
    if typing {
        return prompt_key(code);
    }
    match code {
        KeyCode::Char('g') => InputAction::BeginJumpPrompt,
        KeyCode::Char('q') => InputAction::Quit,
        _ => InputAction::Nothing,
    }
}

fn prompt_key(code: KeyCode) -> InputAction {
    match code {
        KeyCode::Enter => InputAction::PromptSubmit,
        KeyCode::Esc => InputAction::PromptCancel,
        KeyCode::Backspace => InputAction::PromptBackspace,
        KeyCode::Char(c) if c.is_ascii_digit() => InputAction::PromptChar(c),
        _ => InputAction::Nothing,
    }
}

fn nav_key(code: KeyCode) -> Option<NavKey> {
    match code {
        KeyCode::Right => Some(NavKey::Right),
        KeyCode::Left => Some(NavKey::Left),
        KeyCode::Char(' ') => Some(NavKey::Space),
        KeyCode::Home => Some(NavKey::Home),
        KeyCode::End => Some(NavKey::End),
        _ => None,
    }
}

/// Resolves a click inside the slide list to the slide row under it.
fn slide_row_at(list: ListGeometry, column: u16, row: u16) -> Option<usize> {
    let area = list.area;
    if area.width < 2 || area.height < 2 {
        return None;
    }
    let inside_x = column > area.x && column < area.x + area.width - 1;
    let inside_y = row > area.y && row < area.y + area.height - 1;
    if !inside_x || !inside_y {
        return None;
    }
    Some(list.top + usize::from(row - area.y - 1))
}

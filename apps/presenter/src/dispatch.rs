//! Intent orchestration from input surfaces to the controller queue.

use crossbeam_channel::{Sender, TrySendError};
use deck_core::NavIntent;

pub fn dispatch_intent(tx: &Sender<NavIntent>, intent: NavIntent, status: &mut String) {
    let intent_name = match &intent {
        NavIntent::Advance => "advance",
        NavIntent::Retreat => "retreat",
        NavIntent::First => "first",
        NavIntent::Last => "last",
        NavIntent::JumpTo(_) => "jump_to",
        NavIntent::Swipe { .. } => "swipe",
        NavIntent::ScrollSettled { .. } => "scroll_settled",
    };

    match tx.try_send(intent) {
        Ok(()) => tracing::debug!(intent = intent_name, "queued navigation intent"),
        Err(TrySendError::Full(_)) => {
            *status = "navigation queue is full; intent dropped".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "navigation consumer disconnected".to_string();
        }
    }
}

use super::*;

#[test]
fn nav_keys_map_to_their_intents() {
    assert_eq!(intent_for_key(NavKey::Right, false), Some(NavIntent::Advance));
    assert_eq!(intent_for_key(NavKey::Space, false), Some(NavIntent::Advance));
    assert_eq!(intent_for_key(NavKey::Left, false), Some(NavIntent::Retreat));
    assert_eq!(intent_for_key(NavKey::Home, false), Some(NavIntent::First));
    assert_eq!(intent_for_key(NavKey::End, false), Some(NavIntent::Last));
}

#[test]
fn every_nav_key_is_suppressed_while_typing() {
    for key in [
        NavKey::Right,
        NavKey::Left,
        NavKey::Space,
        NavKey::Home,
        NavKey::End,
    ] {
        assert_eq!(intent_for_key(key, true), None);
    }
}

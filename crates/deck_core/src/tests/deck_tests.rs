use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_deck_dir() -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("deck_core_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp deck dir");
    dir
}

#[test]
fn discover_orders_slides_by_filename_and_skips_the_index() {
    let dir = temp_deck_dir();
    fs::write(dir.join("index.html"), "<title>Course</title>").expect("index");
    fs::write(
        dir.join("slide-02.html"),
        "<html><head><title>Retrieval</title></head></html>",
    )
    .expect("slide 2");
    fs::write(
        dir.join("slide-01.html"),
        "<html><head><title>Embeddings</title></head></html>",
    )
    .expect("slide 1");
    fs::write(dir.join("notes.txt"), "not a slide").expect("notes");

    let deck = Deck::discover(&dir).expect("discover");
    let titles: Vec<&str> = deck.slides().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Embeddings", "Retrieval"]);

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn discover_falls_back_to_the_file_stem_without_a_title() {
    let dir = temp_deck_dir();
    fs::write(dir.join("slide-01.html"), "<html><body></body></html>").expect("slide");

    let deck = Deck::discover(&dir).expect("discover");
    assert_eq!(deck.get(0).map(|s| s.title.as_str()), Some("slide-01"));

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn discover_on_a_missing_directory_is_an_io_error() {
    let dir = temp_deck_dir().join("does-not-exist");
    let result = Deck::discover(&dir);
    assert!(matches!(result, Err(DeckError::Io { .. })));
}

#[test]
fn an_empty_directory_yields_an_empty_deck() {
    let dir = temp_deck_dir();
    let deck = Deck::discover(&dir).expect("discover");
    assert!(deck.is_empty());
    assert_eq!(deck.len(), 0);
    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn extract_title_handles_attributes_and_blank_titles() {
    assert_eq!(
        extract_title("<TITLE lang=\"ko\"> Vector Stores </TITLE>"),
        Some("Vector Stores".to_string())
    );
    assert_eq!(extract_title("<title></title>"), None);
    assert_eq!(extract_title("<body>no head</body>"), None);
}

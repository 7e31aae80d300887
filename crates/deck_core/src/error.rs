use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    /// The only meaningful error condition: a deck with zero slides.
    /// Navigation stays unwired when initialization hits this.
    #[error("no slides found in deck")]
    EmptyDeck,
    #[error("failed to read deck directory '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

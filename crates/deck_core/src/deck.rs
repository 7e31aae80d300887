use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// One full-viewport content section of the presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub source: PathBuf,
}

/// Ordered, fixed-length collection of slides. Populated once at
/// initialization; the length never changes for the session lifetime.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    pub fn from_slides(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    /// Enumerates `*.html` files directly under `dir` in lexicographic
    /// filename order. The landing page (`index.html`) is not a slide.
    pub fn discover(dir: &Path) -> Result<Self, DeckError> {
        let entries = fs::read_dir(dir).map_err(|source| DeckError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut slides = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DeckError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".html") || name == "index.html" {
                continue;
            }
            let title = fs::read_to_string(&path)
                .ok()
                .and_then(|html| extract_title(&html))
                .unwrap_or_else(|| name.trim_end_matches(".html").to_string());
            slides.push(Slide {
                title,
                source: path,
            });
        }

        slides.sort_by(|a, b| a.source.file_name().cmp(&b.source.file_name()));
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }
}

/// Pulls the text of the first `<title>` element out of a slide document.
/// A plain scan is enough for course decks; malformed markup falls back to
/// the file stem at the call site.
fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let start = lower[open..].find('>')? + open + 1;
    let end = lower[start..].find("</title")? + start;
    let title = html[start..end].trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod tests;

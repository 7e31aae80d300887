use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub deck_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            deck_dir: "./deck".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("deck_dir") {
                settings.deck_dir = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Ok(v) = std::env::var("DECK_DIR") {
        settings.deck_dir = v;
    }
    if let Ok(v) = std::env::var("APP__DECK_DIR") {
        settings.deck_dir = v;
    }

    // Hosting platforms commonly hand out only a port number.
    if let Ok(v) = std::env::var("PORT") {
        if let Ok(port) = v.parse::<u16>() {
            settings.bind_addr = with_port(&settings.bind_addr, port);
        }
    }

    settings
}

fn with_port(bind_addr: &str, port: u16) -> String {
    let host = bind_addr
        .rsplit_once(':')
        .map(|(host, _)| host)
        .unwrap_or(bind_addr);
    format!("{host}:{port}")
}

/// Validates the configured deck directory before the server binds, so a
/// misconfiguration fails at startup instead of on the first request.
pub fn prepare_deck_dir(raw_deck_dir: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(raw_deck_dir.trim());
    let metadata = fs::metadata(&path).with_context(|| {
        format!(
            "deck directory '{}' is missing; set deck_dir in server.toml or DECK_DIR",
            path.display()
        )
    })?;
    if !metadata.is_dir() {
        anyhow::bail!("deck path '{}' is not a directory", path.display());
    }
    Ok(path)
}

//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use mention_core::{ExportMessage, MentionConfig};

/// Get the ~/.mention directory path, creating it if needed
pub fn mention_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let mention_dir = home.join(".mention");

    if !mention_dir.exists() {
        fs::create_dir_all(&mention_dir)
            .with_context(|| format!("Failed to create {}", mention_dir.display()))?;
    }

    Ok(mention_dir)
}

/// Get the ~/.mention/logs directory path, creating it if needed
pub fn logs_dir() -> Result<PathBuf> {
    let logs_dir = mention_dir()?.join("logs");
    if !logs_dir.exists() {
        fs::create_dir_all(&logs_dir)
            .with_context(|| format!("Failed to create {}", logs_dir.display()))?;
    }
    Ok(logs_dir)
}

/// Load the config at `path`, or ~/.mention/config.json when none is given.
/// A missing default config yields the defaults.
pub fn load_config(path: Option<&str>) -> Result<MentionConfig> {
    let (path, explicit) = match path {
        Some(p) => (PathBuf::from(p), true),
        None => (mention_dir()?.join("config.json"), false),
    };

    if !explicit && !path.exists() {
        return Ok(MentionConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<MentionConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = MentionConfig::from_json(&json)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    config
        .format()
        .with_context(|| format!("Invalid template in {}", path.display()))?;
    Ok(config)
}

/// Export sent messages to ~/.mention/messages.json
pub fn export_messages(messages: &[ExportMessage]) -> Result<PathBuf> {
    let mention_dir = mention_dir()?;
    let export_path = mention_dir.join("messages.json");

    let json = mention_core::to_json(messages).context("Failed to serialize messages")?;

    fs::write(&export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    Ok(export_path)
}

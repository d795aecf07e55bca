//! Run metadata: skip a build when the manifest has not changed.
//!
//! ```toml
//! [main]
//! user = "octocat"
//! last_run = 1718000000
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub main: MainSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// UNIX seconds of the last successful run.
    pub last_run: u64,
}

impl RunMetadata {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid run metadata {}", path.display()))
    }
}

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

/// Whether the manifest needs rendering again.
///
/// True when the metadata is missing or unreadable, when the manifest's
/// mtime cannot be read, or when the manifest was modified during or after
/// the second of the last run.
pub fn should_run(manifest: &Path, metadata: &Path) -> bool {
    let Ok(meta) = RunMetadata::read(metadata) else {
        return true;
    };
    let Some(modified) = get_mtime(manifest) else {
        return true;
    };
    unix_secs(modified) >= meta.main.last_run
}

/// Record the current user and time.
pub fn write_metadata(path: &Path) -> Result<()> {
    let meta = RunMetadata {
        main: MainSection {
            user: current_user(),
            last_run: unix_secs(SystemTime::now()),
        },
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let content = toml::to_string(&meta).context("failed to serialize run metadata")?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn current_user() -> Option<String> {
    ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .filter(|user| !user.is_empty())
}

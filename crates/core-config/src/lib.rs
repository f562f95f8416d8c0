//! Configuration loading and parsing.
//!
//! Parses `quill.toml` extracting `[editor] tab_stop = <n>` with default 8
//! when absent. Unknown fields are ignored (TOML deserialization
//! tolerance) so the file format can grow without breaking older builds.
//! A missing or unparseable file yields the defaults; an editor must come
//! up even when its config is broken.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize, Clone)]
pub struct EditorSection {
    /// Tab stop width in columns. Values below 1 are clamped.
    #[serde(default = "EditorSection::default_tab_stop")]
    pub tab_stop: usize,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
        }
    }
}

impl EditorSection {
    const fn default_tab_stop() -> usize {
        8
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorSection,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
}

impl Config {
    /// Effective tab stop: the configured value clamped to at least 1.
    pub fn tab_stop(&self) -> usize {
        let raw = self.file.editor.tab_stop;
        let clamped = raw.max(1);
        if clamped != raw {
            warn!(target: "config", raw, clamped, "tab_stop_clamped");
        }
        clamped
    }
}

/// Best-effort config path following platform conventions: a local
/// `quill.toml` wins over the user config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("quill.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join("quill.toml");
    }
    PathBuf::from("quill.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config { file }),
            Err(e) => {
                warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

//! Engine configuration, read from a JSON file.
//!
//! ```json
//! {
//!   "morse_table": "data/morsecode.json",
//!   "pinyin_dictionary": "data/pinyin.json",
//!   "snapshot": "target/tables.bin",
//!   "timing": { "dot_ms": 100 }
//! }
//! ```
//!
//! Every field is optional. Without `morse_table` the built-in international
//! table is used; without `snapshot` nothing is cached.

use crate::error::Result;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub morse_table: Option<PathBuf>,
    pub pinyin_dictionary: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub timing: TimingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            morse_table: None,
            pinyin_dictionary: PathBuf::from("data/pinyin.json"),
            snapshot: None,
            timing: TimingConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Like [`EngineConfig::load`], but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config {} not found; using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// Keying speed. All other durations are multiples of one dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub dot_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { dot_ms: 100 }
    }
}

impl TimingConfig {
    pub fn dot(&self) -> Duration {
        Duration::from_millis(self.dot_ms)
    }

    pub fn dash(&self) -> Duration {
        self.dot() * 3
    }

    /// Silence after every dot or dash.
    pub fn element_gap(&self) -> Duration {
        self.dot()
    }

    /// Silence for each space between letters.
    pub fn letter_gap(&self) -> Duration {
        self.dot() * 3
    }
}

// src/lib.rs
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::config::{EngineConfig, TimingConfig};
pub use crate::core::engine::MorseEngine;
pub use crate::core::schedule::KeyingSchedule;
pub use crate::core::types::{is_morse_code, Decoded, Guess};
pub use crate::error::{EngineError, Result};
pub use crate::persistence::SnapshotSources;

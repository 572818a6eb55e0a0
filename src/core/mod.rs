// src/core/mod.rs
pub mod converter;
pub mod decoder;
pub mod dictionary;
pub mod engine;
pub mod morse;
pub mod schedule;
pub mod tone;
pub mod types;

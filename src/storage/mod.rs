// src/storage/mod.rs

//! Storage for run outputs.
//!
//! The pipeline writes two artifacts per run, both atomically:
//! - `tree.json` — the assembled channel tree for the publisher
//! - `skipped_exercises.json` — the failure log of skipped categories

pub mod local;

pub use local::LocalStore;

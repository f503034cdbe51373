// src/models/mod.rs

//! Domain models for the chef application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose: raw API payloads, configuration, and
//! the assembled output tree.

mod config;
mod item;
mod tree;

// Re-export all public types
pub use config::{
    ApiConfig, AuthKind, CategoryLabel, ChannelConfig, Config, GradeLabel, Grouping, HttpConfig,
    PathsConfig, TaxonomyConfig,
};
pub use item::{Author, Page, RawAnswer, RawItem, RawQuestion, Theme};
pub use tree::{
    AudioNode, ChannelTree, ExerciseNode, ExerciseQuestion, FailureLog, Html5Node, MasteryPolicy,
    SkippedExercise, TopicNode, TreeNode,
};

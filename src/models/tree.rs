//! Output tree nodes handed to the external publisher.
//!
//! The assembled tree is serialized as JSON with a `kind` tag per node,
//! matching what the upload client expects.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::ChannelConfig;

/// The root container plus channel-level metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelTree {
    pub title: String,
    pub source_domain: String,
    pub source_id: String,
    pub description: String,
    pub thumbnail: String,
    pub language: String,
    pub children: Vec<TreeNode>,
}

impl ChannelTree {
    /// Build an empty channel root from configuration.
    pub fn from_config(channel: &ChannelConfig, source_domain: &str) -> Self {
        Self {
            title: channel.title.clone(),
            source_domain: source_domain.to_string(),
            source_id: channel.source_id.clone(),
            description: channel.description.clone(),
            thumbnail: channel.thumbnail.clone(),
            language: channel.language.clone(),
            children: Vec::new(),
        }
    }
}

/// One node of the output tree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Topic(TopicNode),
    Audio(AudioNode),
    Html5(Html5Node),
    Exercise(ExerciseNode),
}

/// A grouping node: theme, grade, section, or per-item container.
#[derive(Debug, Clone, Serialize)]
pub struct TopicNode {
    pub source_id: String,
    pub title: String,
    pub children: Vec<TreeNode>,
}

impl TopicNode {
    pub fn new(source_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }
}

/// An audio lesson pointing at its remote media file.
#[derive(Debug, Clone, Serialize)]
pub struct AudioNode {
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Remote URL of the audio file
    pub path: String,
}

/// A rendered text passage pointing at its cached HTML5 package.
#[derive(Debug, Clone, Serialize)]
pub struct Html5Node {
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Local path of the package artifact
    pub path: String,
}

/// A scored exercise normalized from one category's raw questions.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseNode {
    /// Stable identifier, `{item_id}:{category}`
    pub source_id: String,

    /// Display label resolved from the category table
    pub title: String,

    pub mastery: MasteryPolicy,

    pub questions: Vec<ExerciseQuestion>,
}

/// Mastery policy for an exercise.
#[derive(Debug, Clone, Serialize)]
pub struct MasteryPolicy {
    /// Mastery model name, always `m_of_n`
    pub model: &'static str,

    /// Correct answers required; never exceeds the question count
    pub m: u32,

    pub randomize: bool,
}

/// One normalized single-selection question.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseQuestion {
    pub id: String,

    /// Prompt text
    pub question: String,

    /// Unique answer texts in first-seen order
    pub answers: Vec<String>,

    /// First answer text marked correct; may legitimately be unset
    pub correct_answer: Option<String>,

    /// Extension point, currently always empty
    pub hints: Vec<String>,
}

/// A zero-question exercise category skipped during container building.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedExercise {
    pub item_id: u64,
    pub item_title: String,
    pub category: String,
}

/// Side artifact listing skipped categories for manual review.
#[derive(Debug, Clone, Serialize)]
pub struct FailureLog {
    pub generated_at: DateTime<Utc>,
    pub skipped: Vec<SkippedExercise>,
}

impl FailureLog {
    pub fn new(skipped: Vec<SkippedExercise>) -> Self {
        Self {
            generated_at: Utc::now(),
            skipped,
        }
    }
}

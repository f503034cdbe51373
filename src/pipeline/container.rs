// src/pipeline/container.rs

//! Content container building.
//!
//! Wraps one item (audio node or rendered text package) together with its
//! normalized exercises in a synthetic topic node, keeping each lesson
//! next to its quizzes in the published tree.

use std::collections::HashMap;

use reqwest::blocking::Client;

use crate::error::Result;
use crate::models::{
    AudioNode, Html5Node, RawItem, SkippedExercise, TopicNode, TreeNode,
};
use crate::pipeline::exercise::normalize_exercise;
use crate::pipeline::package::PackageCache;

/// The two content kinds the API serves.
///
/// A closed enum: the "unrecognized item type" contract violation cannot
/// be represented at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Audio,
    Text,
}

/// Builds per-item containers, accumulating the skipped-category log.
pub struct ContainerBuilder<'a> {
    packages: &'a PackageCache,
    client: &'a Client,
    category_labels: &'a HashMap<String, String>,
    skipped: Vec<SkippedExercise>,
}

impl<'a> ContainerBuilder<'a> {
    pub fn new(
        packages: &'a PackageCache,
        client: &'a Client,
        category_labels: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            packages,
            client,
            category_labels,
            skipped: Vec::new(),
        }
    }

    /// Build the container node for one item.
    ///
    /// A missing audio reference or a failed text render degrades the
    /// container (content child omitted, exercises kept); an unknown
    /// exercise category aborts the run.
    pub fn build_container(&mut self, kind: ItemKind, item: &RawItem) -> Result<TreeNode> {
        let mut container = TopicNode::new(format!("{}:container", item.id), item.title.clone());

        match kind {
            ItemKind::Audio => match audio_node(item) {
                Some(node) => container.children.push(node),
                None => log::error!(
                    "No audio URL for audio id={} with title={}",
                    item.id,
                    item.title
                ),
            },
            ItemKind::Text => match self.packages.render(self.client, item) {
                Ok(zip_path) => container.children.push(TreeNode::Html5(Html5Node {
                    source_id: item.id.to_string(),
                    title: item.title.clone(),
                    description: item.excerpt.clone(),
                    author: item.author.name().to_string(),
                    thumbnail: item.image.clone(),
                    path: zip_path.to_string_lossy().into_owned(),
                })),
                Err(error) => log::error!(
                    "Dropping content child for text id={}: {}",
                    item.id,
                    error
                ),
            },
        }

        for (category, questions) in &item.questions {
            if questions.is_empty() {
                log::warn!(
                    "Skipping empty exercise category '{}' on item {}",
                    category,
                    item.id
                );
                self.skipped.push(SkippedExercise {
                    item_id: item.id,
                    item_title: item.title.clone(),
                    category: category.clone(),
                });
                continue;
            }
            let exercise =
                normalize_exercise(item.id, category, questions, self.category_labels)?;
            container.children.push(TreeNode::Exercise(exercise));
        }

        Ok(TreeNode::Topic(container))
    }

    /// Hand over the skipped-category entries collected so far.
    pub fn into_skipped(self) -> Vec<SkippedExercise> {
        self.skipped
    }
}

fn audio_node(item: &RawItem) -> Option<TreeNode> {
    let audio_url = item.audio.as_ref()?;
    Some(TreeNode::Audio(AudioNode {
        source_id: item.id.to_string(),
        title: item.title.clone(),
        description: item.excerpt.clone(),
        author: item.author.name().to_string(),
        thumbnail: item.image.clone(),
        path: audio_url.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, RawAnswer, RawQuestion};
    use indexmap::IndexMap;
    use std::fs;
    use tempfile::TempDir;

    fn labels() -> HashMap<String, String> {
        HashMap::from([
            ("comprehension".to_string(), "الاستيعاب".to_string()),
            ("listening".to_string(), "الاستماع".to_string()),
        ])
    }

    fn question() -> RawQuestion {
        RawQuestion {
            id: 1,
            title: "سؤال".to_string(),
            answers: vec![RawAnswer {
                title: "جواب".to_string(),
                is_correct: true,
            }],
        }
    }

    fn audio_item(id: u64, audio: Option<&str>) -> RawItem {
        let mut questions = IndexMap::new();
        questions.insert("listening".to_string(), vec![question()]);
        questions.insert("comprehension".to_string(), vec![question()]);
        RawItem {
            id,
            title: "درس".to_string(),
            excerpt: "مقتطف".to_string(),
            author: Author::Name("Kamkalima".to_string()),
            image: None,
            body: None,
            audio: audio.map(str::to_string),
            themes: Vec::new(),
            min_grade: None,
            questions,
        }
    }

    fn test_cache(tmp: &TempDir) -> PackageCache {
        let template_dir = tmp.path().join("templates");
        fs::create_dir_all(template_dir.join("css")).unwrap();
        fs::write(template_dir.join("index.template.html"), "{title}{content}").unwrap();
        fs::write(template_dir.join("css/styles.css"), "").unwrap();
        PackageCache::new(tmp.path().join("zips"), template_dir)
    }

    #[test]
    fn audio_container_wraps_content_then_exercises() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let client = Client::new();
        let labels = labels();
        let mut builder = ContainerBuilder::new(&cache, &client, &labels);

        let item = audio_item(4, Some("https://kamkalima.com/media/4.mp3"));
        let TreeNode::Topic(topic) = builder.build_container(ItemKind::Audio, &item).unwrap()
        else {
            panic!("container must be a topic node");
        };

        assert_eq!(topic.source_id, "4:container");
        assert_eq!(topic.children.len(), 3);
        assert!(matches!(topic.children[0], TreeNode::Audio(_)));
        // Exercises follow in category-presentation order.
        let exercise_ids: Vec<&str> = topic.children[1..]
            .iter()
            .map(|child| match child {
                TreeNode::Exercise(e) => e.source_id.as_str(),
                _ => panic!("expected exercise"),
            })
            .collect();
        assert_eq!(exercise_ids, ["4:listening", "4:comprehension"]);
    }

    #[test]
    fn audio_without_url_omits_content_child() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let client = Client::new();
        let labels = labels();
        let mut builder = ContainerBuilder::new(&cache, &client, &labels);

        let item = audio_item(5, None);
        let TreeNode::Topic(topic) = builder.build_container(ItemKind::Audio, &item).unwrap()
        else {
            panic!("container must be a topic node");
        };

        assert_eq!(topic.children.len(), 2);
        assert!(topic
            .children
            .iter()
            .all(|child| matches!(child, TreeNode::Exercise(_))));
    }

    #[test]
    fn text_container_wraps_rendered_package() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let client = Client::new();
        let labels = labels();
        let mut builder = ContainerBuilder::new(&cache, &client, &labels);

        let mut item = audio_item(6, None);
        item.body = Some("المتن".to_string());
        let TreeNode::Topic(topic) = builder.build_container(ItemKind::Text, &item).unwrap()
        else {
            panic!("container must be a topic node");
        };

        match &topic.children[0] {
            TreeNode::Html5(node) => assert!(node.path.ends_with("6.zip")),
            other => panic!("expected html5 child, got {other:?}"),
        }
    }

    #[test]
    fn zero_question_category_is_logged_not_emitted() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let client = Client::new();
        let labels = labels();
        let mut builder = ContainerBuilder::new(&cache, &client, &labels);

        let mut item = audio_item(8, Some("https://kamkalima.com/media/8.mp3"));
        item.questions
            .insert("comprehension".to_string(), Vec::new());
        let TreeNode::Topic(topic) = builder.build_container(ItemKind::Audio, &item).unwrap()
        else {
            panic!("container must be a topic node");
        };

        // Audio child plus the one remaining non-empty exercise.
        assert_eq!(topic.children.len(), 2);

        let skipped = builder.into_skipped();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].item_id, 8);
        assert_eq!(skipped[0].item_title, "درس");
        assert_eq!(skipped[0].category, "comprehension");
    }

    #[test]
    fn unknown_category_aborts() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let client = Client::new();
        let labels = HashMap::new();
        let mut builder = ContainerBuilder::new(&cache, &client, &labels);

        let item = audio_item(9, Some("https://kamkalima.com/media/9.mp3"));
        assert!(builder.build_container(ItemKind::Audio, &item).is_err());
    }
}

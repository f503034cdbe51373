// src/pipeline/assemble.rs

//! Final tree assembly.
//!
//! Folds grouped buckets into the nested output structure. Traversal
//! order is always explicit: the configured grade order at the top level
//! and [`ordered_themes`] below it, so repeated runs produce an identical
//! tree from identical input.

use crate::error::Result;
use crate::models::{TaxonomyConfig, TopicNode, TreeNode};
use crate::pipeline::container::{ContainerBuilder, ItemKind};
use crate::pipeline::group::{GradeThemeBuckets, ThemeBuckets, ordered_themes};

/// Flat revision: one topic per theme, audio then text containers.
pub fn assemble_flat(
    builder: &mut ContainerBuilder<'_>,
    audios_by_theme: &ThemeBuckets<'_>,
    texts_by_theme: &ThemeBuckets<'_>,
    theme_order: &[String],
) -> Result<Vec<TreeNode>> {
    let all_themes: std::collections::HashSet<&String> = audios_by_theme
        .keys()
        .chain(texts_by_theme.keys())
        .collect();

    let mut children = Vec::new();
    for theme in ordered_themes(all_themes.into_iter(), theme_order) {
        log::info!("Processing theme {theme}");
        let mut topic = TopicNode::new(theme.clone(), theme.clone());

        if let Some(audio_items) = audios_by_theme.get(&theme) {
            for item in audio_items {
                topic
                    .children
                    .push(builder.build_container(ItemKind::Audio, item)?);
            }
        }
        if let Some(text_items) = texts_by_theme.get(&theme) {
            for item in text_items {
                topic
                    .children
                    .push(builder.build_container(ItemKind::Text, item)?);
            }
        }

        children.push(TreeNode::Topic(topic));
    }
    Ok(children)
}

/// Hierarchical revision: reading and listening sections, each nesting
/// grade then theme.
pub fn assemble_hierarchical(
    builder: &mut ContainerBuilder<'_>,
    audios: &GradeThemeBuckets<'_>,
    texts: &GradeThemeBuckets<'_>,
    taxonomy: &TaxonomyConfig,
) -> Result<Vec<TreeNode>> {
    let reading = assemble_section(
        builder,
        ItemKind::Text,
        texts,
        "reading",
        &taxonomy.reading_title,
        taxonomy,
    )?;
    let listening = assemble_section(
        builder,
        ItemKind::Audio,
        audios,
        "listening",
        &taxonomy.listening_title,
        taxonomy,
    )?;
    Ok(vec![reading, listening])
}

fn assemble_section(
    builder: &mut ContainerBuilder<'_>,
    kind: ItemKind,
    buckets: &GradeThemeBuckets<'_>,
    section_id: &str,
    section_title: &str,
    taxonomy: &TaxonomyConfig,
) -> Result<TreeNode> {
    let mut section = TopicNode::new(section_id, section_title);

    for grade_label in &taxonomy.grade_order {
        let Some(themes) = buckets.get(grade_label) else {
            continue;
        };
        log::info!("Processing grade {grade_label} ({section_id})");
        let mut grade_topic =
            TopicNode::new(format!("{section_id}:{grade_label}"), grade_label.clone());

        for theme in ordered_themes(themes.keys(), &taxonomy.theme_order) {
            let mut theme_topic = TopicNode::new(
                format!("{section_id}:{grade_label}:{theme}"),
                theme.clone(),
            );
            for item in &themes[&theme] {
                theme_topic.children.push(builder.build_container(kind, item)?);
            }
            grade_topic.children.push(TreeNode::Topic(theme_topic));
        }

        section.children.push(TreeNode::Topic(grade_topic));
    }

    Ok(TreeNode::Topic(section))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, RawItem, Theme};
    use crate::pipeline::group::{group_by_grade_and_theme, group_by_theme};
    use crate::pipeline::package::PackageCache;
    use reqwest::blocking::Client;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn item(id: u64, themes: &[&str], min_grade: u32, audio: bool) -> RawItem {
        RawItem {
            id,
            title: format!("item {id}"),
            excerpt: String::new(),
            author: Author::Name("Kamkalima".to_string()),
            image: None,
            body: (!audio).then(|| "متن".to_string()),
            audio: audio.then(|| format!("https://kamkalima.com/media/{id}.mp3")),
            themes: themes
                .iter()
                .map(|name| Theme {
                    name: name.to_string(),
                })
                .collect(),
            min_grade: Some(min_grade),
            questions: Default::default(),
        }
    }

    fn test_cache(tmp: &TempDir) -> PackageCache {
        let template_dir = tmp.path().join("templates");
        fs::create_dir_all(template_dir.join("css")).unwrap();
        fs::write(template_dir.join("index.template.html"), "{title}{content}").unwrap();
        fs::write(template_dir.join("css/styles.css"), "").unwrap();
        PackageCache::new(tmp.path().join("zips"), template_dir)
    }

    fn titles(nodes: &[TreeNode]) -> Vec<&str> {
        nodes
            .iter()
            .map(|node| match node {
                TreeNode::Topic(t) => t.title.as_str(),
                _ => panic!("expected topic node"),
            })
            .collect()
    }

    #[test]
    fn flat_assembly_orders_themes_and_interleaves_kinds() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let client = Client::new();
        let labels = HashMap::new();
        let mut builder = ContainerBuilder::new(&cache, &client, &labels);

        let audios = [item(1, &["ب", "أ"], 7, true)];
        let texts = [item(2, &["أ"], 7, false)];
        let audios_by_theme = group_by_theme(&audios);
        let texts_by_theme = group_by_theme(&texts);

        let children =
            assemble_flat(&mut builder, &audios_by_theme, &texts_by_theme, &[]).unwrap();

        assert_eq!(titles(&children), ["أ", "ب"]);
        let TreeNode::Topic(first) = &children[0] else {
            unreachable!()
        };
        // Theme "أ" holds the audio container before the text container.
        let ids: Vec<&str> = first
            .children
            .iter()
            .map(|c| match c {
                TreeNode::Topic(t) => t.source_id.as_str(),
                _ => panic!("expected container topic"),
            })
            .collect();
        assert_eq!(ids, ["1:container", "2:container"]);
    }

    #[test]
    fn hierarchical_assembly_splits_sections_and_grades() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let client = Client::new();
        let labels = HashMap::new();
        let mut builder = ContainerBuilder::new(&cache, &client, &labels);

        let taxonomy = TaxonomyConfig {
            grade_order: vec!["lower".to_string(), "upper".to_string()],
            grades: vec![
                crate::models::GradeLabel {
                    min_grade: 7,
                    label: "lower".to_string(),
                },
                crate::models::GradeLabel {
                    min_grade: 10,
                    label: "upper".to_string(),
                },
            ],
            ..TaxonomyConfig::default()
        };
        let grades = taxonomy.grade_table();

        let audios = [item(1, &["x"], 10, true)];
        let texts = [item(2, &["x"], 7, false), item(3, &["y"], 7, false)];
        let audio_buckets = group_by_grade_and_theme(&audios, &grades).unwrap();
        let text_buckets = group_by_grade_and_theme(&texts, &grades).unwrap();

        let children =
            assemble_hierarchical(&mut builder, &audio_buckets, &text_buckets, &taxonomy)
                .unwrap();
        assert_eq!(children.len(), 2);

        // Reading section: only the lower grade is present, with both themes.
        let TreeNode::Topic(reading) = &children[0] else {
            unreachable!()
        };
        assert_eq!(reading.source_id, "reading");
        assert_eq!(titles(&reading.children), ["lower"]);
        let TreeNode::Topic(lower) = &reading.children[0] else {
            unreachable!()
        };
        assert_eq!(titles(&lower.children), ["x", "y"]);

        // Listening section: empty lower grade is skipped entirely.
        let TreeNode::Topic(listening) = &children[1] else {
            unreachable!()
        };
        assert_eq!(listening.source_id, "listening");
        assert_eq!(titles(&listening.children), ["upper"]);
    }
}

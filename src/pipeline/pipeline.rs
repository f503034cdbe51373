// src/pipeline/pipeline.rs

//! Full pipeline orchestration.
//!
//! Strictly sequential: authenticate, fetch all pages of both listings,
//! group, build containers, assemble, write outputs. No retries; any
//! fatal error unwinds before output is written.

use crate::error::Result;
use crate::models::{ChannelTree, Config, FailureLog, Grouping};
use crate::pipeline::assemble::{assemble_flat, assemble_hierarchical};
use crate::pipeline::container::ContainerBuilder;
use crate::pipeline::group::{group_by_grade_and_theme, group_by_theme};
use crate::pipeline::package::PackageCache;
use crate::services::{ApiAuth, ApiClient, authenticate};
use crate::storage::LocalStore;
use crate::utils::http::create_client;

/// What a completed run produced.
#[derive(Debug)]
pub struct PipelineSummary {
    pub audio_items: usize,
    pub text_items: usize,
    pub skipped_exercises: usize,
    pub tree_path: std::path::PathBuf,
    pub failure_log_path: std::path::PathBuf,
}

/// Run the full aggregation pipeline.
pub fn run_pipeline(config: &Config, auth: &ApiAuth, update: bool) -> Result<PipelineSummary> {
    let client = create_client(&config.http)?;

    log::info!("Requesting access token from {}", config.api.domain);
    let token = authenticate(&client, &config.api, auth)?;
    let api = ApiClient::new(client.clone(), config.api.domain.clone(), token);

    let packages = PackageCache::new(&config.paths.cache_dir, &config.paths.template_dir);
    if update {
        let removed = packages.clear()?;
        log::info!(
            "Update mode: cleared {} cached packages from {}",
            removed,
            config.paths.cache_dir
        );
    }

    log::info!("Fetching text items from {}", config.api.texts_endpoint);
    let text_items = api.fetch_all_items(&config.api.texts_endpoint)?;
    log::info!("Fetching audio items from {}", config.api.audios_endpoint);
    let audio_items = api.fetch_all_items(&config.api.audios_endpoint)?;

    let category_labels = config.taxonomy.category_table();
    let mut builder = ContainerBuilder::new(&packages, &client, &category_labels);

    log::info!("Organizing content items into the channel tree");
    let mut channel = ChannelTree::from_config(&config.channel, &config.api.domain);
    channel.children = match config.taxonomy.grouping {
        Grouping::Theme => assemble_flat(
            &mut builder,
            &group_by_theme(&audio_items),
            &group_by_theme(&text_items),
            &config.taxonomy.theme_order,
        )?,
        Grouping::GradeTheme => {
            let grades = config.taxonomy.grade_table();
            assemble_hierarchical(
                &mut builder,
                &group_by_grade_and_theme(&audio_items, &grades)?,
                &group_by_grade_and_theme(&text_items, &grades)?,
                &config.taxonomy,
            )?
        }
    };

    let skipped = builder.into_skipped();
    let store = LocalStore::new(&config.paths.output_dir);
    let tree_path = store.write_json("tree.json", &channel)?;
    let failure_log_path = store.write_json("skipped_exercises.json", &FailureLog::new(skipped.clone()))?;

    let summary = PipelineSummary {
        audio_items: audio_items.len(),
        text_items: text_items.len(),
        skipped_exercises: skipped.len(),
        tree_path,
        failure_log_path,
    };
    log::info!(
        "Pipeline complete: {} audio items, {} text items, {} skipped exercise categories",
        summary.audio_items,
        summary.text_items,
        summary.skipped_exercises
    );
    log::info!("Channel tree written to {:?}", summary.tree_path);
    Ok(summary)
}

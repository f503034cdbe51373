// src/pipeline/package.rs

//! HTML5 package rendering and caching for text items.
//!
//! Each text item becomes a self-contained zip: a rendered `index.html`,
//! the static stylesheet, and optionally a splash image. Packages are
//! cached by item id: once `{cache_dir}/{id}.zip` exists it is returned
//! untouched, skipping both templating and the splash-image fetch. A
//! content change under an unchanged id therefore needs the explicit
//! update (full wipe) mode to show up.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{AppError, Result};
use crate::models::RawItem;
use crate::utils::http::fetch_bytes;
use crate::utils::url::file_extension;

/// Renders and caches per-item HTML5 packages.
pub struct PackageCache {
    cache_dir: PathBuf,
    template_dir: PathBuf,
}

impl PackageCache {
    pub fn new(cache_dir: impl Into<PathBuf>, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            template_dir: template_dir.into(),
        }
    }

    /// Path a given item's package lives at, whether or not it exists yet.
    pub fn package_path(&self, item_id: u64) -> PathBuf {
        self.cache_dir.join(format!("{item_id}.zip"))
    }

    /// Render a text item into a cached package, idempotent per item id.
    pub fn render(&self, client: &Client, item: &RawItem) -> Result<PathBuf> {
        let zip_path = self.package_path(item.id);
        if zip_path.exists() {
            log::debug!("Found existing package at {:?}", zip_path);
            return Ok(zip_path);
        }
        log::debug!("Rendering package for text item id={}", item.id);

        let body = item
            .body
            .as_deref()
            .ok_or_else(|| AppError::render(item.id, "text item has no body"))?;

        let template = fs::read_to_string(self.template_dir.join("index.template.html"))?;
        let styles = fs::read(self.template_dir.join("css/styles.css"))?;

        // Splash image is fetched exactly once, at render time. Its
        // absence degrades the package instead of failing it.
        let splash = match &item.image {
            Some(url) => Some(
                fetch_bytes(client, url)
                    .map_err(|e| AppError::render(item.id, format!("splash fetch failed: {e}")))?,
            ),
            None => {
                log::warn!("Package {} has no splash image", item.id);
                None
            }
        };

        let audio_href = item.audio.as_deref().map(published_audio_href);
        let index_html = render_index(&template, item, body, splash.is_some(), audio_href.as_deref());

        fs::create_dir_all(&self.cache_dir)?;
        let tmp_path = zip_path.with_extension("zip.tmp");
        {
            let file = fs::File::create(&tmp_path)?;
            let mut zip = ZipWriter::new(file);
            let options = SimpleFileOptions::default();

            zip.start_file("index.html", options)?;
            zip.write_all(index_html.as_bytes())?;

            zip.start_file("css/styles.css", options)?;
            zip.write_all(&styles)?;

            if let Some(bytes) = &splash {
                zip.start_file("img/splash.jpg", options)?;
                zip.write_all(bytes)?;
            }

            zip.finish()?;
        }
        fs::rename(&tmp_path, &zip_path)?;

        Ok(zip_path)
    }

    /// Delete every cached package; the update mode runs this up front.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(AppError::Io(e)),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "zip") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Substitute the recognized placeholders into the index template.
///
/// The `show_*` placeholders feed CSS `display` values, so conditional
/// sections collapse without a template engine.
fn render_index(
    template: &str,
    item: &RawItem,
    body: &str,
    show_splash_image: bool,
    audio_href: Option<&str>,
) -> String {
    template
        .replace("{title}", &item.title)
        .replace("{content}", body)
        .replace("{author}", item.author.name())
        .replace("{description}", &item.excerpt)
        .replace(
            "{show_splash_image}",
            if show_splash_image { "block" } else { "none" },
        )
        .replace(
            "{show_audio_element}",
            if audio_href.is_some() { "block" } else { "none" },
        )
        .replace("{audio_href}", audio_href.unwrap_or(""))
}

/// Relative path of an item's audio file in the published storage layout.
///
/// Published media is content-addressed by filename, so the cross
/// reference can be computed here without fetching the audio.
pub fn published_audio_href(audio_url: &str) -> String {
    let digest = hex::encode(Sha256::digest(audio_url.as_bytes()));
    let ext = file_extension(audio_url).unwrap_or_else(|| "mp3".to_string());
    format!("../{digest}.{ext}")
}

//! Application configuration structures.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content API endpoints and authentication generation
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Channel-level metadata handed to the publisher
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Taxonomy lookup tables and traversal order
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    /// Local filesystem layout
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        if self.api.domain.trim().is_empty() {
            return Err(AppError::config("api.domain is empty"));
        }
        for endpoint in [&self.api.audios_endpoint, &self.api.texts_endpoint] {
            if !endpoint.starts_with(&self.api.domain) {
                return Err(AppError::config(format!(
                    "Endpoint {} is not under api.domain {}",
                    endpoint, self.api.domain
                )));
            }
        }
        if self.taxonomy.categories.is_empty() {
            return Err(AppError::config("No exercise categories defined"));
        }
        if self.taxonomy.grouping == Grouping::GradeTheme {
            if self.taxonomy.grade_order.is_empty() {
                return Err(AppError::config(
                    "taxonomy.grade_order is required for grade-theme grouping",
                ));
            }
            // Every grade label must be reachable from the traversal order,
            // otherwise grouped items would silently vanish from the tree.
            for grade in &self.taxonomy.grades {
                if !self.taxonomy.grade_order.contains(&grade.label) {
                    return Err(AppError::config(format!(
                        "Grade label '{}' missing from taxonomy.grade_order",
                        grade.label
                    )));
                }
            }
            for label in &self.taxonomy.grade_order {
                if !self.taxonomy.grades.iter().any(|g| &g.label == label) {
                    return Err(AppError::config(format!(
                        "taxonomy.grade_order entry '{label}' has no grade mapping"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            http: HttpConfig::default(),
            channel: ChannelConfig::default(),
            taxonomy: TaxonomyConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

/// Content API endpoints and authentication generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Content provider domain; pagination cursors must stay on it
    #[serde(default = "defaults::domain")]
    pub domain: String,

    /// Paginated audio items listing
    #[serde(default = "defaults::audios_endpoint")]
    pub audios_endpoint: String,

    /// Paginated text items listing
    #[serde(default = "defaults::texts_endpoint")]
    pub texts_endpoint: String,

    /// Which API generation to authenticate against
    #[serde(default)]
    pub auth_kind: AuthKind,
}

impl ApiConfig {
    /// OAuth token endpoint for the client-credentials exchange.
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth/token", self.domain)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            domain: defaults::domain(),
            audios_endpoint: defaults::audios_endpoint(),
            texts_endpoint: defaults::texts_endpoint(),
            auth_kind: AuthKind::default(),
        }
    }
}

/// API authentication generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthKind {
    /// OAuth client-credentials exchange yielding a bearer token
    #[default]
    Oauth,
    /// Long-lived token appended as a query parameter
    Static,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Channel-level metadata handed to the publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default = "defaults::channel_title")]
    pub title: String,

    #[serde(default = "defaults::channel_source_id")]
    pub source_id: String,

    #[serde(default = "defaults::channel_description")]
    pub description: String,

    #[serde(default = "defaults::channel_thumbnail")]
    pub thumbnail: String,

    /// Channel language code
    #[serde(default = "defaults::language")]
    pub language: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: defaults::channel_title(),
            source_id: defaults::channel_source_id(),
            description: defaults::channel_description(),
            thumbnail: defaults::channel_thumbnail(),
            language: defaults::language(),
        }
    }
}

/// Taxonomy lookup tables and traversal order.
///
/// Category and grade labels are configuration data rather than code so
/// that new categories and grades are additive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Which tree revision to assemble
    #[serde(default)]
    pub grouping: Grouping,

    /// Explicit theme ordering prefix; themes not listed follow sorted
    #[serde(default)]
    pub theme_order: Vec<String>,

    /// Explicit top-level grade traversal order (grade-theme grouping)
    #[serde(default = "defaults::grade_order")]
    pub grade_order: Vec<String>,

    /// Exercise category name -> display label
    #[serde(default = "defaults::categories")]
    pub categories: Vec<CategoryLabel>,

    /// Minimum-grade integer -> human grade-range label
    #[serde(default = "defaults::grades")]
    pub grades: Vec<GradeLabel>,

    /// Title of the text-items section (grade-theme grouping)
    #[serde(default = "defaults::reading_title")]
    pub reading_title: String,

    /// Title of the audio-items section (grade-theme grouping)
    #[serde(default = "defaults::listening_title")]
    pub listening_title: String,
}

impl TaxonomyConfig {
    /// Category lookup table keyed by API category name.
    pub fn category_table(&self) -> HashMap<String, String> {
        self.categories
            .iter()
            .map(|c| (c.name.clone(), c.label.clone()))
            .collect()
    }

    /// Grade lookup table keyed by minimum-grade integer.
    pub fn grade_table(&self) -> HashMap<u32, String> {
        self.grades
            .iter()
            .map(|g| (g.min_grade, g.label.clone()))
            .collect()
    }
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            grouping: Grouping::default(),
            theme_order: Vec::new(),
            grade_order: defaults::grade_order(),
            categories: defaults::categories(),
            grades: defaults::grades(),
            reading_title: defaults::reading_title(),
            listening_title: defaults::listening_title(),
        }
    }
}

/// Tree revision selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grouping {
    /// Flat: theme -> item containers
    #[default]
    Theme,
    /// Hierarchical: section -> grade -> theme -> item containers
    GradeTheme,
}

/// Mapping from API category name to display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLabel {
    /// Category name as it appears in item payloads
    pub name: String,

    /// Human-readable display label
    pub label: String,
}

/// Mapping from minimum-grade integer to grade-range label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeLabel {
    /// Minimum grade reported by the API
    pub min_grade: u32,

    /// Human-readable grade-range label
    pub label: String,
}

/// Local filesystem layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where rendered HTML5 packages are cached
    #[serde(default = "defaults::cache_dir")]
    pub cache_dir: String,

    /// Template directory with index.template.html and css/styles.css
    #[serde(default = "defaults::template_dir")]
    pub template_dir: String,

    /// Where tree.json and the failure log are written
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Credential file (JSON client credentials or plain token)
    #[serde(default = "defaults::credentials")]
    pub credentials: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cache_dir: defaults::cache_dir(),
            template_dir: defaults::template_dir(),
            output_dir: defaults::output_dir(),
            credentials: defaults::credentials(),
        }
    }
}

mod defaults {
    use super::{CategoryLabel, GradeLabel};

    // API defaults
    pub fn domain() -> String {
        "https://kamkalima.com".into()
    }
    pub fn audios_endpoint() -> String {
        "https://kamkalima.com/api/v1/content/audios".into()
    }
    pub fn texts_endpoint() -> String {
        "https://kamkalima.com/api/v1/content/texts".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; kamkalima-chef/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Channel defaults
    pub fn channel_title() -> String {
        "Kamkalima (العربيّة)".into()
    }
    pub fn channel_source_id() -> String {
        "audios-and-texts".into()
    }
    pub fn channel_description() -> String {
        "تقدم المصادر التعليمية الخاصة باللغة العربية من منصة كم كلمة محتوى \
         عربي متفاعل لمتعلمي ومعلمي المرحلة الثانوية. وتمكن النصوص والأنشطة \
         التفاعلية المتعلمين من تطوير مهارات الاستماع والقراءة بالإضافة إلى \
         مهارات وقواعد الكتابة العربية."
            .into()
    }
    pub fn channel_thumbnail() -> String {
        "data/kk-logo.png".into()
    }
    pub fn language() -> String {
        "ar".into()
    }

    // Taxonomy defaults
    pub fn categories() -> Vec<CategoryLabel> {
        vec![
            CategoryLabel {
                name: "comprehension".to_string(),
                label: "الاستيعاب".to_string(),
            },
            CategoryLabel {
                name: "grammar".to_string(),
                label: "القواعد".to_string(),
            },
            CategoryLabel {
                name: "listening".to_string(),
                label: "الاستماع".to_string(),
            },
            CategoryLabel {
                name: "vocabulary".to_string(),
                label: "المفردات والتراكيب".to_string(),
            },
        ]
    }
    pub fn grades() -> Vec<GradeLabel> {
        vec![
            GradeLabel {
                min_grade: 7,
                label: "الصفوف ٧-٩".to_string(),
            },
            GradeLabel {
                min_grade: 10,
                label: "الصفوف ١٠-١٢".to_string(),
            },
        ]
    }
    pub fn grade_order() -> Vec<String> {
        vec!["الصفوف ٧-٩".to_string(), "الصفوف ١٠-١٢".to_string()]
    }
    pub fn reading_title() -> String {
        "القراءة".into()
    }
    pub fn listening_title() -> String {
        "الاستماع".into()
    }

    // Path defaults
    pub fn cache_dir() -> String {
        "chefdata/zipfiles".into()
    }
    pub fn template_dir() -> String {
        "templates".into()
    }
    pub fn output_dir() -> String {
        "chefdata".into()
    }
    pub fn credentials() -> String {
        "credentials/client_credentials.json".into()
    }
}

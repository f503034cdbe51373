//! Raw content items as returned by the Kamkalima API.

use indexmap::IndexMap;
use serde::Deserialize;

/// One page of a paginated listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Items on this page
    #[serde(default)]
    pub items: Vec<RawItem>,

    /// Link to the next page, absent or null on the last page
    #[serde(default)]
    pub next_page_url: Option<String>,
}

/// One audio or text record from the content API.
///
/// Owned transiently for the duration of a run; the pipeline never
/// persists raw items.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    /// Numeric item identifier
    pub id: u64,

    /// Item title
    pub title: String,

    /// Short description shown under the title
    #[serde(default)]
    pub excerpt: String,

    /// Author, either an object with a name or free text
    pub author: Author,

    /// Splash/thumbnail image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Full passage body (text items only)
    #[serde(default)]
    pub body: Option<String>,

    /// Audio file URL (audio items only)
    #[serde(default)]
    pub audio: Option<String>,

    /// Topical tags; items may carry several
    #[serde(default)]
    pub themes: Vec<Theme>,

    /// Minimum grade the item is written for
    #[serde(default)]
    pub min_grade: Option<u32>,

    /// Exercise category name -> raw questions, in API-presentation order
    #[serde(default)]
    pub questions: IndexMap<String, Vec<RawQuestion>>,
}

/// A topical tag attached to an item.
#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    /// Theme display name, used as the grouping key
    pub name: String,
}

/// Item author; the API has returned both shapes over time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Author {
    /// `{"name": "..."}` object
    Detailed { name: String },
    /// Bare string
    Name(String),
}

impl Author {
    /// Author display name regardless of payload shape.
    pub fn name(&self) -> &str {
        match self {
            Author::Detailed { name } => name,
            Author::Name(name) => name,
        }
    }
}

/// One raw quiz question attached to an item.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    /// Question identifier
    pub id: u64,

    /// Prompt text
    pub title: String,

    /// Candidate answers
    #[serde(default)]
    pub answers: Vec<RawAnswer>,
}

/// One candidate answer for a raw question.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnswer {
    /// Answer text
    pub title: String,

    /// Whether this answer is marked correct upstream
    #[serde(default)]
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_item_with_object_author() {
        let json = r#"{
            "id": 42,
            "title": "نص تجريبي",
            "excerpt": "مقتطف",
            "author": {"name": "كاتب"},
            "body": "المتن",
            "themes": [{"name": "العلوم"}],
            "min_grade": 7,
            "questions": {
                "comprehension": [],
                "vocabulary": []
            }
        }"#;
        let item: RawItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 42);
        assert_eq!(item.author.name(), "كاتب");
        assert_eq!(item.themes.len(), 1);
        assert_eq!(item.min_grade, Some(7));
        // Category iteration order must match the payload order.
        let categories: Vec<&String> = item.questions.keys().collect();
        assert_eq!(categories, ["comprehension", "vocabulary"]);
    }

    #[test]
    fn deserialize_item_with_plain_author() {
        let json = r#"{"id": 1, "title": "t", "author": "مجهول"}"#;
        let item: RawItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.author.name(), "مجهول");
        assert!(item.questions.is_empty());
        assert!(item.body.is_none());
    }

    #[test]
    fn deserialize_page_without_next() {
        let json = r#"{"items": [], "next_page_url": null}"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_url.is_none());
    }
}

// src/pipeline/group.rs

//! Taxonomy grouping of fetched items.
//!
//! Grouping fans out: an item tagged with N themes lands in N buckets.
//! Bucket storage is order-agnostic; deterministic traversal order is the
//! assembler's job via [`ordered_themes`] and the configured grade order.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::RawItem;

/// Items per theme name.
pub type ThemeBuckets<'a> = HashMap<String, Vec<&'a RawItem>>;

/// Items per grade label, then per theme name.
pub type GradeThemeBuckets<'a> = HashMap<String, ThemeBuckets<'a>>;

/// Classify items into one bucket per theme they carry.
pub fn group_by_theme(items: &[RawItem]) -> ThemeBuckets<'_> {
    let mut buckets: ThemeBuckets = HashMap::new();
    for item in items {
        for theme in &item.themes {
            buckets.entry(theme.name.clone()).or_default().push(item);
        }
    }
    buckets
}

/// Classify items by resolved grade label, then by theme.
///
/// A grade indicator missing from the lookup table is a contract
/// violation and fails the run rather than silently dropping the item.
pub fn group_by_grade_and_theme<'a>(
    items: &'a [RawItem],
    grades: &HashMap<u32, String>,
) -> Result<GradeThemeBuckets<'a>> {
    let mut buckets: GradeThemeBuckets = HashMap::new();
    for item in items {
        let min_grade = item
            .min_grade
            .ok_or_else(|| AppError::lookup("grade", format!("<missing on item {}>", item.id)))?;
        let label = grades
            .get(&min_grade)
            .ok_or_else(|| AppError::lookup("grade", min_grade.to_string()))?;

        let themed = buckets.entry(label.clone()).or_default();
        for theme in &item.themes {
            themed.entry(theme.name.clone()).or_default().push(item);
        }
    }
    Ok(buckets)
}

/// Deterministic traversal order over the theme names actually present.
///
/// Pinned names come first, in the order given; any remaining themes
/// follow sorted lexicographically. Never relies on HashMap iteration
/// order.
pub fn ordered_themes<'a>(
    present: impl IntoIterator<Item = &'a String>,
    pinned: &[String],
) -> Vec<String> {
    let mut remaining: Vec<&String> = present.into_iter().collect();
    let mut ordered = Vec::with_capacity(remaining.len());

    for name in pinned {
        if let Some(pos) = remaining.iter().position(|t| *t == name) {
            ordered.push(remaining.remove(pos).clone());
        }
    }
    remaining.sort();
    ordered.extend(remaining.into_iter().cloned());
    ordered
}

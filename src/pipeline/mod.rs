// src/pipeline/mod.rs

//! Pipeline stages, leaf-first:
//!
//! - `group`: taxonomy bucketing (theme, or grade then theme)
//! - `exercise`: raw question lists -> scored exercise nodes
//! - `package`: cached HTML5 package rendering for text items
//! - `container`: one item + its exercises -> container node
//! - `assemble`: grouped buckets -> deterministic output tree
//! - `pipeline`: end-to-end orchestration

pub mod assemble;
pub mod container;
pub mod exercise;
pub mod group;
pub mod package;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod validate;

pub use container::{ContainerBuilder, ItemKind};
pub use package::PackageCache;
pub use pipeline::{PipelineSummary, run_pipeline};
pub use validate::run_validate;

// src/lib.rs

//! Kamkalima Chef Library
//!
//! Fetches audio lessons and text passages from the Kamkalima content API,
//! normalizes their quiz questions into scored exercises, renders cached
//! HTML5 packages for text items, and assembles everything into a
//! hierarchical content tree ready for upload.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

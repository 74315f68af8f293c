//! Core library: scanning, text extraction, subject classification, and
//! collision-safe placement of note files.

pub mod classifier;
pub mod config;
pub mod extractor;
pub mod pipeline;
pub mod placer;
pub mod scanner;
pub mod subjects;

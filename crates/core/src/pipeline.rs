use crate::classifier::{Classifier, UNCLASSIFIED};
use crate::extractor::TextExtractor;
use crate::placer::{self, PlacementMode};
use crate::scanner;
use crate::subjects::SubjectTable;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub discovered: usize,
    pub placed: usize,
    pub unclassified: usize,
    pub failed: usize,
}

/// Runs the full pipeline: enumerate supported files under `input_root`,
/// extract text from each, classify it, and place it under
/// `output_root/<subject>/`. A failure on one file is logged and never
/// aborts the rest of the run.
pub fn run(
    input_root: &Path,
    output_root: &Path,
    extensions: &[String],
    excludes: &[String],
    table: SubjectTable,
    extractor: &dyn TextExtractor,
    mode: PlacementMode,
) -> Result<Summary> {
    info!("Starting to process files from {}", input_root.display());

    let files = scanner::scan(input_root, extensions, excludes)?;
    let mut summary = Summary {
        discovered: files.len(),
        ..Summary::default()
    };

    if files.is_empty() {
        warn!("No supported files found in {}", input_root.display());
        return Ok(summary);
    }
    info!("Found {} files to process", files.len());

    let classifier = Classifier::new(table);
    for path in &files {
        match process_one(path, output_root, &classifier, extractor, mode) {
            Ok(subject) => {
                if subject == UNCLASSIFIED {
                    summary.unclassified += 1;
                }
                summary.placed += 1;
            }
            Err(e) => {
                warn!("Error processing {}: {:#}", path.display(), e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Processing complete: {} placed, {} unclassified, {} failed",
        summary.placed, summary.unclassified, summary.failed
    );
    Ok(summary)
}

fn process_one(
    path: &Path,
    output_root: &Path,
    classifier: &Classifier,
    extractor: &dyn TextExtractor,
    mode: PlacementMode,
) -> Result<String> {
    info!("Processing file: {}", path.display());

    let subject = match extractor.extract(path) {
        Ok(text) if !text.trim().is_empty() => classifier.classify(&text),
        Ok(_) => {
            warn!("Could not extract text from {}", path.display());
            UNCLASSIFIED.to_string()
        }
        Err(e) => {
            warn!("Error extracting text from {}: {}", path.display(), e);
            UNCLASSIFIED.to_string()
        }
    };

    placer::place(path, output_root, &subject, mode)?;
    Ok(subject)
}

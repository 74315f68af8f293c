use crate::classifier::normalize;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Subject name -> keyword list, loaded once per run and immutable after.
/// `BTreeMap` keeps subject names unique and iteration ordered, which the
/// classifier's tie-break relies on.
#[derive(Debug, Clone, Default)]
pub struct SubjectTable {
    subjects: BTreeMap<String, Vec<String>>,
}

impl SubjectTable {
    pub fn from_map(raw: BTreeMap<String, Vec<String>>) -> Self {
        let subjects = raw
            .into_iter()
            .map(|(name, keywords)| {
                // Keywords are matched against normalized text, so they are
                // normalized too; empties and duplicates would skew the
                // presence count.
                let mut keywords: Vec<String> = keywords
                    .iter()
                    .map(|k| normalize(k))
                    .filter(|k| !k.is_empty())
                    .collect();
                keywords.sort();
                keywords.dedup();
                (name, keywords)
            })
            .collect();
        Self { subjects }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subject table: {}", path.display()))?;
        let raw: BTreeMap<String, Vec<String>> = toml::from_str(&content)
            .with_context(|| format!("Malformed subject table: {}", path.display()))?;
        Ok(Self::from_map(raw))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.subjects
            .iter()
            .map(|(name, keywords)| (name.as_str(), keywords.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

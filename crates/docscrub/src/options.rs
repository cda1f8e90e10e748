// ABOUTME: Configuration options for docscrub: CleanerOptions, ProcessOptions and ProcessorBuilder.
// ABOUTME: ProcessorBuilder provides a fluent API for constructing DocumentProcessor instances.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProcessError, Result};
use crate::extractors::{ContentExtractor, ReadableExtractor};
use crate::processor::DocumentProcessor;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "files";

/// Class marking the container inserted around paragraphs with images.
pub const EXERCISE_CLASS: &str = "exercise";

/// Paragraph prefixes that mark boilerplate answers.
pub const DEFAULT_ANSWER_PREFIXES: &[&str] = &["Resposta", "Respostas"];

/// Toggles for each cleanup rule plus the rule parameters.
///
/// Every rule is enabled by default. When deserialized, missing keys take
/// their default value, so a rules file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerOptions {
    pub remove_divs: bool,
    pub remove_lang: bool,
    pub clean_empty_tables: bool,
    pub clean_empty_colgroups: bool,
    pub remove_classes: bool,
    pub remove_ids: bool,
    pub wrap_images: bool,
    pub remove_spans: bool,
    pub remove_imgs: bool,
    pub remove_answers: bool,
    pub remove_empty_tags: bool,
    pub answer_prefixes: Vec<String>,
    pub exercise_class: String,
}

impl Default for CleanerOptions {
    fn default() -> Self {
        Self {
            remove_divs: true,
            remove_lang: true,
            clean_empty_tables: true,
            clean_empty_colgroups: true,
            remove_classes: true,
            remove_ids: true,
            wrap_images: true,
            remove_spans: true,
            remove_imgs: true,
            remove_answers: true,
            remove_empty_tags: true,
            answer_prefixes: DEFAULT_ANSWER_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            exercise_class: EXERCISE_CLASS.to_string(),
        }
    }
}

impl CleanerOptions {
    /// Loads options from a JSON rules file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ProcessError::io(path, "read rules", e))?;
        serde_json::from_str(&raw)
            .map_err(|e| ProcessError::parse_failed(path, "parse rules", Some(e.into())))
    }
}

/// What a single `process` call should do besides cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    pub remove_tables: bool,
    pub separate_tables: bool,
    pub separate_content: bool,
    pub wrap_images: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            remove_tables: false,
            separate_tables: false,
            separate_content: false,
            wrap_images: true,
        }
    }
}

impl fmt::Display for ProcessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "remove_tables={} separate_tables={} separate_content={} wrap_images={}",
            self.remove_tables, self.separate_tables, self.separate_content, self.wrap_images
        )
    }
}

/// Builder for constructing DocumentProcessor instances with custom configuration.
pub struct ProcessorBuilder {
    pub(crate) output_dir: PathBuf,
    pub(crate) cleaner: CleanerOptions,
    pub(crate) extractor: Box<dyn ContentExtractor>,
}

impl ProcessorBuilder {
    /// Create a new ProcessorBuilder with default options.
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            cleaner: CleanerOptions::default(),
            extractor: Box::new(ReadableExtractor::default()),
        }
    }

    /// Set the directory artifacts are written to.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the cleanup rule toggles.
    pub fn cleaner_options(mut self, options: CleanerOptions) -> Self {
        self.cleaner = options;
        self
    }

    /// Replace the readable-content extractor.
    pub fn extractor(mut self, extractor: impl ContentExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Load and validate the document at `path`.
    pub fn open(self, path: impl AsRef<Path>) -> Result<DocumentProcessor> {
        DocumentProcessor::with_builder(path.as_ref(), self)
    }
}

impl Default for ProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProcessorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorBuilder")
            .field("output_dir", &self.output_dir)
            .field("cleaner", &self.cleaner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rules_file_keeps_defaults() {
        let opts: CleanerOptions =
            serde_json::from_str(r#"{"remove_divs": false, "answer_prefixes": ["Answer"]}"#)
                .unwrap();
        assert!(!opts.remove_divs);
        assert!(opts.remove_imgs);
        assert_eq!(opts.answer_prefixes, vec!["Answer".to_string()]);
        assert_eq!(opts.exercise_class, EXERCISE_CLASS);
    }

    #[test]
    fn default_process_options_only_wrap() {
        let opts = ProcessOptions::default();
        assert!(opts.wrap_images);
        assert!(!opts.remove_tables && !opts.separate_tables && !opts.separate_content);
    }

    #[test]
    fn rules_file_errors_are_typed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(CleanerOptions::from_json_file(&path).unwrap_err().is_parse_failed());
        assert!(CleanerOptions::from_json_file(dir.path().join("missing.json"))
            .unwrap_err()
            .is_io());
    }
}

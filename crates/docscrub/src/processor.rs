// ABOUTME: DocumentProcessor loads one HTML file, runs the Cleaner, splits out tables/content and saves artifacts.
// ABOUTME: Construction validates the input; every later failure aborts the call and keeps files already written.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::artifacts::{Artifact, ArtifactKind, OutputDir};
use crate::cleaner::Cleaner;
use crate::dom::{cleaners, Document};
use crate::error::{ProcessError, Result};
use crate::extractors::ContentExtractor;
use crate::options::{ProcessOptions, ProcessorBuilder};

/// Accepted input extension, compared case-insensitively.
pub const HTML_EXTENSION: &str = "html";

/// Paths written by one `process` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub content: Option<Artifact>,
    pub tables: Option<Artifact>,
    pub file: Artifact,
}

/// Owns one loaded document for the lifetime of a run.
pub struct DocumentProcessor {
    path: PathBuf,
    document: Document,
    content: String,
    cleaner: Cleaner,
    output: OutputDir,
}

impl std::fmt::Debug for DocumentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProcessor")
            .field("path", &self.path)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl DocumentProcessor {
    /// Create a builder for configuring the processor.
    pub fn builder() -> ProcessorBuilder {
        ProcessorBuilder::new()
    }

    /// Opens `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        ProcessorBuilder::new().open(path)
    }

    pub(crate) fn with_builder(path: &Path, builder: ProcessorBuilder) -> Result<Self> {
        validate_file(path)?;

        let raw = read_source(path)?;
        let document = Document::parse(&raw)
            .map_err(|e| ProcessError::parse_failed(path, "parse", Some(e.into())))?;
        debug!(path = %path.display(), bytes = raw.len(), "document parsed");

        let content = extract_content(builder.extractor.as_ref(), &raw, path)?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
            content,
            cleaner: Cleaner::new(builder.cleaner),
            output: OutputDir::new(builder.output_dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Readable content extracted from the original markup.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn output_dir(&self) -> &OutputDir {
        &self.output
    }

    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    /// Cleans the document, then saves content, separates or removes tables,
    /// and finally saves the main document. `separate_tables` wins over
    /// `remove_tables`.
    pub fn process(&mut self, options: ProcessOptions) -> Result<ProcessReport> {
        info!(%options, path = %self.path.display(), "processing document");
        self.cleaner
            .clean_with_wrap(&mut self.document, options.wrap_images);

        let content = if options.separate_content {
            Some(self.save_only_content()?)
        } else {
            None
        };

        let mut tables = None;
        if options.separate_tables {
            tables = self.separate_all_tables()?;
        } else if options.remove_tables {
            self.remove_all_tables();
        }

        let file = self.save_processed_file()?;
        Ok(ProcessReport {
            content,
            tables,
            file,
        })
    }

    /// Saves the extracted content as `content-N.html`.
    pub fn save_only_content(&self) -> Result<Artifact> {
        self.output.write(ArtifactKind::Content, &self.content)
    }

    /// Saves the current tree as `file-N.html`.
    pub fn save_processed_file(&self) -> Result<Artifact> {
        self.output
            .write(ArtifactKind::File, &self.document.to_html())
    }

    /// Deletes every table from the document. Returns how many were removed.
    pub fn remove_all_tables(&mut self) -> usize {
        let removed = self.document.remove_where(|el| el.is("table"));
        debug!(removed, "tables removed");
        removed
    }

    /// Serialized outermost tables joined by newlines, re-parsed as a
    /// standalone document. `None` when the document has no tables.
    pub fn tables_document(&self) -> Result<Option<Document>> {
        let tables = self.document.find_outermost(|el| el.is("table"));
        if tables.is_empty() {
            return Ok(None);
        }
        let joined = tables
            .iter()
            .map(|table| table.to_html())
            .collect::<Vec<_>>()
            .join("\n");
        Document::parse_fragment(&joined)
            .map(Some)
            .map_err(|e| ProcessError::parse_failed(&self.path, "parse tables", Some(e.into())))
    }

    /// Drops empty tables, writes the rest to `tables-N.html` and deletes
    /// them from the document. Writes nothing when no table remains.
    pub fn separate_all_tables(&mut self) -> Result<Option<Artifact>> {
        cleaners::clean_empty_tables(&mut self.document);

        let Some(tables) = self.tables_document()? else {
            info!("no tables found to separate");
            return Ok(None);
        };

        let artifact = self.output.write(ArtifactKind::Tables, &tables.to_html())?;
        self.remove_all_tables();
        Ok(Some(artifact))
    }
}

fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ProcessError::not_found(path, "open"));
    }
    let is_html = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(HTML_EXTENSION));
    if !is_html {
        return Err(ProcessError::invalid_format(path, "open"));
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ProcessError::io(path, "read", e))?;
    let raw = String::from_utf8(bytes)
        .map_err(|e| ProcessError::parse_failed(path, "decode", Some(e.into())))?;
    if raw.trim().is_empty() {
        return Err(ProcessError::parse_failed(
            path,
            "parse",
            Some(anyhow::anyhow!("document is empty")),
        ));
    }
    Ok(raw)
}

fn extract_content(extractor: &dyn ContentExtractor, raw: &str, path: &Path) -> Result<String> {
    match extractor.extract(raw) {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => {
            warn!(path = %path.display(), "no readable content found");
            Err(ProcessError::extraction_failed(
                path,
                "extract",
                Some(anyhow::anyhow!("extractor produced no content")),
            ))
        }
    }
}

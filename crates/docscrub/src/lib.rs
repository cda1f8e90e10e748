// ABOUTME: Main library entry point for docscrub, the HTML lesson cleaner.
// ABOUTME: Re-exports the public API: DocumentProcessor, Cleaner, Document, options, artifacts and errors.

//! docscrub - strips presentational noise from an HTML document and splits
//! out its tables and readable content.
//!
//! # Example
//!
//! ```no_run
//! use docscrub::{DocumentProcessor, ProcessError, ProcessOptions};
//!
//! fn main() -> Result<(), ProcessError> {
//!     let mut processor = DocumentProcessor::builder()
//!         .output_dir("files")
//!         .open("lesson.html")?;
//!     let report = processor.process(ProcessOptions {
//!         separate_tables: true,
//!         ..ProcessOptions::default()
//!     })?;
//!     println!("{}", report.file.path.display());
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod cleaner;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod menu;
pub mod options;
pub mod processor;

pub use crate::artifacts::{next_free_index, Artifact, ArtifactKind, OutputDir};
pub use crate::cleaner::Cleaner;
pub use crate::dom::{Doctype, Document, Element, NestingTooDeep, Node};
pub use crate::error::{ErrorCode, ProcessError, Result};
pub use crate::extractors::{ContentExtractor, ReadableExtractor};
pub use crate::menu::{parse_tokens, MenuChoice, Plan, Selection};
pub use crate::options::{CleanerOptions, ProcessOptions, ProcessorBuilder};
pub use crate::processor::{DocumentProcessor, ProcessReport};

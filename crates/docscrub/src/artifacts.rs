// ABOUTME: Output artifacts: categories, collision-free file naming and the output directory.
// ABOUTME: Picks the smallest free `<stem>-N.html` by listing the directory at write time.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ProcessError, Result};

pub const ARTIFACT_EXTENSION: &str = "html";

/// Category of a persisted output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Cleaned main document.
    File,
    /// Tables moved out of the main document.
    Tables,
    /// Readable-content text.
    Content,
}

impl ArtifactKind {
    pub fn stem(self) -> &'static str {
        match self {
            ArtifactKind::File => "file",
            ArtifactKind::Tables => "tables",
            ArtifactKind::Content => "content",
        }
    }

    /// File name for the given index, e.g. `tables-3.html`.
    pub fn file_name(self, index: u32) -> String {
        format!("{}-{}.{}", self.stem(), index, ARTIFACT_EXTENSION)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stem())
    }
}

/// Smallest `N >= 1` such that `kind.file_name(N)` is not among `existing`.
pub fn next_free_index<'a, I>(kind: ArtifactKind, existing: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = format!("{}-", kind.stem());
    let suffix = format!(".{}", ARTIFACT_EXTENSION);
    let taken: HashSet<u32> = existing
        .into_iter()
        .filter_map(|name| name.strip_prefix(prefix.as_str()))
        .filter_map(|rest| rest.strip_suffix(suffix.as_str()))
        .filter(|digits| !digits.starts_with('0'))
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|digits| digits.parse::<u32>().ok())
        .collect();

    (1..)
        .find(|n| !taken.contains(n))
        .unwrap_or(1)
}

/// A persisted output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// Directory all artifacts of a run are written to.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates the directory if absent.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| ProcessError::io(&self.root, "create output dir", e))
    }

    fn existing_names(&self) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(&self.root).map_err(|e| ProcessError::io(&self.root, "list output dir", e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ProcessError::io(&self.root, "list output dir", e))?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Next unused path for `kind`, evaluated against the directory as it is now.
    pub fn next_path(&self, kind: ArtifactKind) -> Result<PathBuf> {
        self.ensure()?;
        let names = self.existing_names()?;
        let index = next_free_index(kind, names.iter().map(String::as_str));
        Ok(self.root.join(kind.file_name(index)))
    }

    /// Writes `content` under the next free name for `kind`.
    pub fn write(&self, kind: ArtifactKind, content: &str) -> Result<Artifact> {
        let path = self.next_path(kind)?;
        fs::write(&path, content).map_err(|e| ProcessError::io(&path, "write artifact", e))?;
        info!(kind = %kind, path = %path.display(), "artifact saved");
        Ok(Artifact { kind, path })
    }
}

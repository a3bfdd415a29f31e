//! Directory read tool

use crate::error::{Error, Result};
use crate::path::validate_path;
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolOutput};
use crate::schema::{ParamKind, ParamSchema, ParamSpec};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Default maximum entries for a listing
const DEFAULT_MAX_ENTRIES: usize = 1000;

#[derive(Debug, Deserialize)]
struct DirectoryInput {
    directory: String,
}

/// Tool that recursively lists the files under a directory
pub struct DirectoryReadTool {
    definition: ToolDefinition,
    fixed_dir: Option<PathBuf>,
    max_entries: usize,
}

impl DirectoryReadTool {
    /// Tool name
    pub const NAME: &'static str = "list_files_in_directory";

    /// Create a directory tool that accepts any directory
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            Self::NAME,
            "Recursively list the files in a directory, one path per line.",
        )
        .with_category(ToolCategory::File)
        .with_schema(ParamSchema::new(vec![ParamSpec::required(
            "directory",
            ParamKind::String,
            "Mandatory directory to list content.",
        )]));

        Self {
            definition,
            fixed_dir: None,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Create a directory tool bound to one directory
    #[must_use]
    pub fn for_directory(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let definition = ToolDefinition::new(
            Self::NAME,
            format!("List the files in {}. Takes no input.", dir.display()),
        )
        .with_category(ToolCategory::File);

        Self {
            definition,
            fixed_dir: Some(dir),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Cap the number of listed files
    #[must_use]
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }
}

impl Default for DirectoryReadTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Entries of one directory as `(path, is_dir)`, sorted by path
async fn read_sorted(dir: &Path) -> std::io::Result<Vec<(PathBuf, bool)>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut children = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let is_dir = entry.file_type().await?.is_dir();
        children.push((entry.path(), is_dir));
    }
    children.sort();
    Ok(children)
}

/// Walk `root` depth-first in path order, stopping at `max_entries` files
///
/// Visiting children in sorted order yields paths already sorted, so the walk
/// can stop early. Unreadable subdirectories are skipped.
async fn collect_files(root: &Path, max_entries: usize) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![(root.to_path_buf(), true)];

    while let Some((path, is_dir)) = pending.pop() {
        if !is_dir {
            if files.len() >= max_entries {
                break;
            }
            files.push(path);
            continue;
        }

        match read_sorted(&path).await {
            Ok(children) => pending.extend(children.into_iter().rev()),
            Err(e) if path.as_path() != root => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable directory");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(files)
}

#[async_trait::async_trait]
impl Tool for DirectoryReadTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput> {
        let start = Instant::now();
        let dir = match &self.fixed_dir {
            Some(dir) => dir.clone(),
            None => {
                let input: DirectoryInput = self.definition.schema.parse(&input)?;
                validate_path(&input.directory)?
            }
        };

        if !tokio::fs::metadata(&dir).await.map(|m| m.is_dir()).unwrap_or(false) {
            return Err(Error::Validation(format!(
                "'{}' is not a readable directory",
                dir.display()
            )));
        }

        debug!(path = %dir.display(), "Listing directory");
        let files = collect_files(&dir, self.max_entries).await?;

        let mut lines = vec![format!("File paths under {}:", dir.display())];
        lines.extend(files.iter().map(|p| format!("- {}", p.display())));
        Ok(ToolOutput::new(lines, start))
    }
}

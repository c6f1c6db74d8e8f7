// ABOUTME: Discovers template files under a directory for engine registration
// ABOUTME: Template names are paths relative to the root, joined with forward slashes

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::error::{Result, TemplateError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub name: String,
    pub path: PathBuf,
}

/// Collect every non-hidden file below `dir`, sorted by name.
///
/// A missing or non-directory root is a configuration error.
pub fn discover(dir: &Path) -> Result<Vec<TemplateFile>> {
    if !dir.is_dir() {
        return Err(TemplateError::ConfigurationError(format!(
            "template directory does not exist: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(dir).map_err(|_| {
            TemplateError::ConfigurationError(format!(
                "template outside of directory: {}",
                entry.path().display()
            ))
        })?;

        files.push(TemplateFile {
            name: template_name(relative),
            path: entry.path().to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn template_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

//! Finding document trees and deciding which ones need a rebuild.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use walkdir::WalkDir;

/// Extension of serialized document trees.
pub const DOCTREE_EXTENSION: &str = "json";

/// A document tree found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path of the document relative to the source directory, without
    /// extension and with `/` separators, e.g. `guide/install`.
    pub docname: String,
    /// Location of the serialized tree.
    pub source: PathBuf,
}

/// Lists every document tree under `source_dir`, ordered by path.
pub fn find_documents(source_dir: &Path) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("failed to scan {}", source_dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().is_none_or(|ext| ext != DOCTREE_EXTENSION)
        {
            continue;
        }

        let Some(docname) = docname_of(source_dir, path) else {
            log::warn!("skipping {}: not a valid document name", path.display());
            continue;
        };
        documents.push(Document {
            docname,
            source: path.to_owned(),
        });
    }

    Ok(documents)
}

fn docname_of(source_dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(source_dir).ok()?.with_extension("");
    let parts = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// Whether `target` is missing or older than `source`.
///
/// A source that cannot be read any more is never outdated.
pub fn is_outdated(source: &Path, target: &Path) -> bool {
    let Some(source_time) = modified(source) else {
        log::debug!("source {} vanished", source.display());
        return false;
    };

    match modified(target) {
        Some(target_time) => source_time > target_time,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::time::Duration;

    use super::*;

    fn touch(path: &Path, time: SystemTime) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let file = File::create(path).unwrap();
        file.set_modified(time).unwrap();
    }

    #[test]
    fn documents_are_named_by_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let now = SystemTime::now();
        touch(&dir.path().join("index.json"), now);
        touch(&dir.path().join("guide/install.json"), now);
        touch(&dir.path().join("guide/notes.txt"), now);

        let documents = find_documents(dir.path()).unwrap();
        let names: Vec<_> = documents.iter().map(|doc| doc.docname.as_str()).collect();
        assert_eq!(names, ["guide/install", "index"]);
        assert_eq!(documents[1].source, dir.path().join("index.json"));
    }

    #[test]
    fn staleness_compares_modification_times() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("index.json");
        let target = dir.path().join("Index.xwiki");
        let now = SystemTime::now();

        touch(&source, now);
        assert!(is_outdated(&source, &target));

        touch(&target, now + Duration::from_secs(10));
        assert!(!is_outdated(&source, &target));

        touch(&source, now + Duration::from_secs(20));
        assert!(is_outdated(&source, &target));

        assert!(!is_outdated(&dir.path().join("gone.json"), &target));
    }
}

//! Corpus loading from a directory of markdown files.
//!
//! Discovery and reading are separate phases: the directory tree is walked
//! first (sorted, hidden entries skipped), then every discovered file and its
//! optional sidecar are read in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{Corpus, CorpusError, Metadata, ROOT_MARKER, SourceDocument};

/// Default sidecar suffix (`guide.md` → `guide.meta.yaml`).
const DEFAULT_META_SUFFIX: &str = ".meta.yaml";

/// Builds a [`Corpus`] from markdown files under a source directory.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use rl_corpus::CorpusLoader;
///
/// let corpus = CorpusLoader::new(PathBuf::from("docs")).load()?;
/// for doc in corpus.documents() {
///     println!("{}", doc.key());
/// }
/// # Ok::<(), rl_corpus::CorpusError>(())
/// ```
pub struct CorpusLoader {
    source_dir: PathBuf,
    meta_suffix: String,
    skipped_dirs: Vec<PathBuf>,
}

impl CorpusLoader {
    /// Create a loader using the default `.meta.yaml` sidecar suffix.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self::with_meta_suffix(source_dir, DEFAULT_META_SUFFIX)
    }

    /// Create a loader with a custom sidecar suffix.
    #[must_use]
    pub fn with_meta_suffix(source_dir: PathBuf, meta_suffix: &str) -> Self {
        Self {
            source_dir,
            meta_suffix: meta_suffix.to_owned(),
            skipped_dirs: Vec::new(),
        }
    }

    /// Do not descend into `dir`, e.g. a build output nested in the sources.
    #[must_use]
    pub fn skip_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skipped_dirs.push(dir.into());
        self
    }

    /// Source directory being loaded.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Walk the source directory and load every markdown document.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::SourceNotFound`] if the directory is missing and
    /// [`CorpusError::Io`] if a directory or document cannot be read.
    /// Unreadable or malformed sidecars are logged and skipped.
    pub fn load(&self) -> Result<Corpus, CorpusError> {
        if !self.source_dir.is_dir() {
            return Err(CorpusError::SourceNotFound(self.source_dir.clone()));
        }

        let mut files = Vec::new();
        self.scan_directory(&self.source_dir, &mut files)?;

        let sources = files
            .par_iter()
            .map(|path| self.read_document(path))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            documents = sources.len(),
            source_dir = %self.source_dir.display(),
            "Loaded documents"
        );

        Corpus::new(sources)
    }

    /// Map a document key back to its file inside `base`.
    ///
    /// `~/guide/install.md` under `out` becomes `out/guide/install.md`.
    #[must_use]
    pub fn path_for_key(base: &Path, key: &str) -> PathBuf {
        let relative = key
            .strip_prefix(ROOT_MARKER)
            .unwrap_or(key)
            .trim_start_matches('/');
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(base.to_path_buf(), |path, segment| path.join(segment))
    }

    /// Collect markdown files under `dir` in sorted order.
    fn scan_directory(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CorpusError> {
        let entries = fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))?;

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e.path(), e.file_name().to_string_lossy().into_owned(), is_dir)
            })
            .filter(|(_, name, _)| !name.starts_with('.'))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1));

        for (path, _, is_dir) in entries {
            if is_dir {
                if self.is_skipped(&path) {
                    tracing::debug!(path = %path.display(), "Skipping directory");
                    continue;
                }
                self.scan_directory(&path, files)?;
            } else if is_markdown(&path) {
                files.push(path);
            }
        }
        Ok(())
    }

    /// Whether `dir` is one of the skipped directories, compared canonically
    /// so relative and absolute spellings agree.
    fn is_skipped(&self, dir: &Path) -> bool {
        if self.skipped_dirs.is_empty() {
            return false;
        }
        let canonical = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        self.skipped_dirs.iter().any(|skipped| {
            skipped == dir
                || fs::canonicalize(skipped).is_ok_and(|skipped| skipped == canonical)
        })
    }

    /// Read one document and its sidecar.
    fn read_document(&self, path: &Path) -> Result<SourceDocument, CorpusError> {
        let text = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
        let key = self.key_for(path);
        let metadata = self.load_sidecar(path).unwrap_or_default();
        Ok(SourceDocument::new(key, text).with_metadata(metadata))
    }

    /// Build the `~/...` key of a file under the source directory.
    fn key_for(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.source_dir).unwrap_or(path);
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        format!("{ROOT_MARKER}/{}", segments.join("/"))
    }

    /// Load sidecar metadata for a document, if present and valid.
    fn load_sidecar(&self, path: &Path) -> Option<Metadata> {
        let stem = path.file_stem()?.to_string_lossy();
        let sidecar = path.with_file_name(format!("{stem}{}", self.meta_suffix));
        if !sidecar.is_file() {
            return None;
        }
        let content = fs::read_to_string(&sidecar)
            .inspect_err(|e| {
                tracing::warn!(path = %sidecar.display(), error = %e, "Failed to read metadata file, skipping");
            })
            .ok()?;
        Metadata::from_yaml(&content)
            .inspect_err(|e| {
                tracing::warn!(path = %sidecar.display(), error = %e, "Failed to parse metadata, skipping");
            })
            .ok()
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_assigns_rooted_keys_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.md", "# Home");
        write(dir.path(), "guide/b.md", "# B");
        write(dir.path(), "guide/a.md", "# A");
        write(dir.path(), "notes.txt", "ignored");

        let corpus = CorpusLoader::new(dir.path().to_path_buf()).load().unwrap();
        let keys: Vec<_> = corpus.documents().iter().map(|d| d.key()).collect();

        assert_eq!(keys, vec!["~/guide/a.md", "~/guide/b.md", "~/index.md"]);
    }

    #[test]
    fn test_load_skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".drafts/secret.md", "# Secret");
        write(dir.path(), ".hidden.md", "# Hidden");
        write(dir.path(), "visible.md", "# Visible");

        let corpus = CorpusLoader::new(dir.path().to_path_buf()).load().unwrap();

        assert_eq!(corpus.len(), 1);
        assert!(corpus.get("~/visible.md").is_some());
    }

    #[test]
    fn test_load_skips_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "# A");
        write(dir.path(), "out/a.md", "# A");
        write(dir.path(), "outline/b.md", "# B");

        let corpus = CorpusLoader::new(dir.path().to_path_buf())
            .skip_dir(dir.path().join("out"))
            .load()
            .unwrap();
        let keys: Vec<_> = corpus.documents().iter().map(|d| d.key()).collect();

        assert_eq!(keys, vec!["~/a.md", "~/outline/b.md"]);
    }

    #[test]
    fn test_load_reads_sidecar_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "api/auth.md", "# Auth");
        write(dir.path(), "api/auth.meta.yaml", "title_override: Authentication\n");

        let corpus = CorpusLoader::new(dir.path().to_path_buf()).load().unwrap();
        let doc = corpus.get("~/api/auth.md").unwrap();

        assert_eq!(
            doc.metadata().title_override.as_deref(),
            Some("Authentication")
        );
        assert_eq!(doc.title().as_deref(), Some("Authentication"));
    }

    #[test]
    fn test_load_custom_sidecar_suffix() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "# A");
        write(dir.path(), "a.props.yaml", "title: Custom\n");

        let loader = CorpusLoader::with_meta_suffix(dir.path().to_path_buf(), ".props.yaml");
        let corpus = loader.load().unwrap();

        assert_eq!(
            corpus.get("~/a.md").unwrap().title().as_deref(),
            Some("Custom")
        );
    }

    #[test]
    fn test_load_ignores_malformed_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "# Heading");
        write(dir.path(), "a.meta.yaml", "title: [broken");

        let corpus = CorpusLoader::new(dir.path().to_path_buf()).load().unwrap();

        assert_eq!(
            corpus.get("~/a.md").unwrap().title().as_deref(),
            Some("Heading")
        );
    }

    #[test]
    fn test_load_missing_source_dir() {
        let err = CorpusLoader::new(PathBuf::from("/nonexistent/rl-docs"))
            .load()
            .unwrap_err();
        assert!(matches!(err, CorpusError::SourceNotFound(_)));
    }

    #[test]
    fn test_path_for_key() {
        let base = Path::new("/out");
        assert_eq!(
            CorpusLoader::path_for_key(base, "~/guide/install.md"),
            PathBuf::from("/out/guide/install.md")
        );
        assert_eq!(
            CorpusLoader::path_for_key(base, "~/index.md"),
            PathBuf::from("/out/index.md")
        );
    }
}

use std::path::{Component, Path, PathBuf};

use log::debug;
use thiserror::Error;

// ---------------------------------------------------------------------------
// FileAccess – collaborator that turns a filename into a read URL
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FileAccessError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("path escapes the readable root: {}", .0.display())]
    OutsideRoot(PathBuf),

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves a filename to a URL the renderer can fetch.
pub trait FileAccess {
    fn read_url(&self, filename: &str) -> Result<String, FileAccessError>;
}

// ---------------------------------------------------------------------------
// LocalFileAccess – files below a root directory
// ---------------------------------------------------------------------------

/// Serves files below `root`. Filenames are relative to it and may not
/// leave it, neither through `..` nor through symlinks.
#[derive(Debug, Clone)]
pub struct LocalFileAccess {
    root: PathBuf,
    url_prefix: Option<String>,
}

impl LocalFileAccess {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalFileAccess {
            root: root.into(),
            url_prefix: None,
        }
    }

    /// Emit `prefix + relative/path` instead of `file://` URLs.
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = Some(prefix.into());
        self
    }

    fn resolve(&self, filename: &str) -> Result<(PathBuf, PathBuf), FileAccessError> {
        let relative = Path::new(filename);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(FileAccessError::OutsideRoot(relative.to_path_buf()));
        }

        let full = self.root.join(relative);
        if !full.is_file() {
            return Err(FileAccessError::NotFound(full));
        }

        let canonical_root = canonicalize(&self.root)?;
        let canonical = canonicalize(&full)?;
        if !canonical.starts_with(&canonical_root) {
            return Err(FileAccessError::OutsideRoot(relative.to_path_buf()));
        }
        let inside = canonical
            .strip_prefix(&canonical_root)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok((canonical, inside))
    }
}

impl FileAccess for LocalFileAccess {
    fn read_url(&self, filename: &str) -> Result<String, FileAccessError> {
        let (canonical, inside) = self.resolve(filename)?;
        let url = match &self.url_prefix {
            Some(prefix) => {
                let parts: Vec<String> = inside
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                format!("{prefix}{}", parts.join("/"))
            }
            None => format!("file://{}", canonical.display()),
        };
        debug!("resolved {filename} to {url}");
        Ok(url)
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, FileAccessError> {
    path.canonicalize().map_err(|source| FileAccessError::Io {
        path: path.to_path_buf(),
        source,
    })
}

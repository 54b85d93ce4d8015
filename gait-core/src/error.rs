use std::path::PathBuf;

use thiserror::Error;

/// The only way loading can fail: the source could not be opened.
/// Malformed content is tolerated by the parsers instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Unavailable { path: PathBuf, #[source] source: std::io::Error },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self { LoadError::Unavailable { path, .. } => path }
    }
}

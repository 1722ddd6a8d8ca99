use std::path::PathBuf;

use thiserror::Error;

use crate::core::data::bookmark::Bookmark;

#[derive(Debug, Error)]
pub enum BookmarkStoreError {
    #[error("no bookmark named '{name}'")]
    NotFound { name: String },

    #[error("failed to access bookmarks at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bookmarks at {} are not valid JSON", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Named views saved between sessions.
pub trait BookmarkStore {
    fn load(&self, name: &str) -> Result<Bookmark, BookmarkStoreError>;

    fn save(&self, name: &str, bookmark: Bookmark) -> Result<(), BookmarkStoreError>;

    /// All stored names, sorted.
    fn names(&self) -> Result<Vec<String>, BookmarkStoreError>;
}

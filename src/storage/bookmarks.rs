use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::controllers::ports::bookmark_store::{BookmarkStore, BookmarkStoreError};
use crate::core::data::bookmark::Bookmark;

type BookmarkTable = BTreeMap<String, Bookmark>;

/// Bookmarks kept in one JSON object, `{ "name": [cx, cy, width, cap] }`,
/// sorted by name and indented by four spaces. A missing file is an empty
/// store.
#[derive(Debug, Clone)]
pub struct JsonBookmarkStore {
    path: PathBuf,
}

impl JsonBookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BookmarkTable, BookmarkStoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BookmarkTable::new()),
            Err(source) => {
                return Err(BookmarkStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| BookmarkStoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, table: &BookmarkTable) -> Result<(), BookmarkStoreError> {
        let mut out = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        table
            .serialize(&mut serializer)
            .map_err(|source| BookmarkStoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        fs::write(&self.path, out).map_err(|source| BookmarkStoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl BookmarkStore for JsonBookmarkStore {
    fn load(&self, name: &str) -> Result<Bookmark, BookmarkStoreError> {
        self.read()?
            .remove(name)
            .ok_or_else(|| BookmarkStoreError::NotFound {
                name: name.to_string(),
            })
    }

    fn save(&self, name: &str, bookmark: Bookmark) -> Result<(), BookmarkStoreError> {
        let mut table = self.read()?;
        table.insert(name.to_string(), bookmark);
        self.write(&table)?;

        debug!(name, path = %self.path.display(), "bookmark saved");
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>, BookmarkStoreError> {
        Ok(self.read()?.into_keys().collect())
    }
}

use crate::core::data::complex::Complex;
use serde::{Deserialize, Serialize};

/// A named view is stored as the array `[cx, cy, width, iterations]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BookmarkRecord", into = "BookmarkRecord")]
pub struct Bookmark {
    pub center: Complex,
    pub width: f64,
    pub max_iterations: u32,
}

#[derive(Serialize, Deserialize)]
struct BookmarkRecord(f64, f64, f64, u32);

impl From<BookmarkRecord> for Bookmark {
    fn from(BookmarkRecord(cx, cy, width, max_iterations): BookmarkRecord) -> Self {
        Self {
            center: Complex::new(cx, cy),
            width,
            max_iterations,
        }
    }
}

impl From<Bookmark> for BookmarkRecord {
    fn from(bookmark: Bookmark) -> Self {
        Self(
            bookmark.center.real,
            bookmark.center.imag,
            bookmark.width,
            bookmark.max_iterations,
        )
    }
}

pub mod bookmarks;
pub mod settings;

pub use bookmarks::JsonBookmarkStore;
pub use settings::{DEFAULT_SETTINGS_PATH, Settings, SettingsError};

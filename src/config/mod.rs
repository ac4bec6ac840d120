//! Personalization settings: theme, translucency and background image.

mod settings;
mod watch;

pub use settings::{Settings, SettingsError, SettingsStore};
pub use watch::{SettingsWatcher, WatchError};

//! Live reload of the settings file.
//!
//! Another session (or the `theme`/`translucency`/`background` commands) may
//! rewrite the settings while a session is open. The watcher observes the
//! settings directory and queues a notification whenever the settings file is
//! created or modified; the session drains the queue between commands.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to initialize watcher: {reason}")]
    InitFailed { reason: String },

    #[error("Cannot watch path {path}: {reason}")]
    PathWatchFailed { path: PathBuf, reason: String },
}

impl From<notify::Error> for WatchError {
    fn from(e: notify::Error) -> Self {
        WatchError::InitFailed {
            reason: e.to_string(),
        }
    }
}

/// Watches one settings file for external changes.
pub struct SettingsWatcher {
    changes: flume::Receiver<()>,
    /// Kept alive for as long as events are wanted.
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    pub fn new(settings_path: &Path) -> Result<Self, WatchError> {
        let (dir, file_name) = match (settings_path.parent(), settings_path.file_name()) {
            (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_os_string()),
            _ => {
                return Err(WatchError::PathWatchFailed {
                    path: settings_path.to_path_buf(),
                    reason: "not a file path".to_string(),
                });
            }
        };

        std::fs::create_dir_all(&dir).map_err(|e| WatchError::PathWatchFailed {
            path: dir.clone(),
            reason: e.to_string(),
        })?;

        let (tx, rx) = flume::unbounded();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if touches_file(&event, &file_name) {
                    let _ = tx.send(());
                }
            }
            Err(e) => warn!("Settings watcher error: {}", e),
        })?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: dir.clone(),
                reason: e.to_string(),
            })?;

        debug!("Watching {} for settings changes", dir.display());
        Ok(Self {
            changes: rx,
            _watcher: watcher,
        })
    }

    /// Drain pending notifications; true if the file changed since last call.
    pub fn take_change(&self) -> bool {
        self.changes.try_iter().count() > 0
    }
}

/// A create or modify event naming the settings file.
fn touches_file(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

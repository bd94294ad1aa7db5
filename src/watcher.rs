//! Filesystem change notifier for the content file.
//!
//! The notify callback runs on the watcher's own thread and only ever sets a
//! shared flag. The loop thread swaps it back to false once per iteration, so
//! any burst of writes between two polls reads as a single change.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, trace};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::content::ChangeNotifier;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to watch {}: {source}", path.display())]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Create `path` containing `default_value` and a newline, unless it already exists.
///
/// Returns true if the file was created.
pub fn ensure_exists(path: &Path, default_value: &str) -> Result<bool, WatchError> {
    let create_err = |source| WatchError::Create { path: path.to_path_buf(), source };

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(create_err(err)),
    };
    writeln!(file, "{default_value}").map_err(create_err)?;
    info!("Created {} with default value {default_value:?}", path.display());
    Ok(true)
}

/// Watches one file for content modifications.
pub struct FileWatcher {
    changed: Arc<AtomicBool>,
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Start watching `path`. The file must exist; see [`ensure_exists`].
    pub fn start(path: impl Into<PathBuf>) -> Result<Self, WatchError> {
        let path = path.into();
        let watch_err = |source| WatchError::Watch { path: path.clone(), source };

        let changed = Arc::new(AtomicBool::new(false));
        let changed_flag = Arc::clone(&changed);

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            let Ok(event) = result else {
                return;
            };
            if is_content_modification(&event) {
                trace!("Content modified: {:?}", event.kind);
                changed_flag.store(true, Ordering::SeqCst);
            }
        })
        .map_err(watch_err)?;

        watcher.watch(&path, RecursiveMode::NonRecursive).map_err(watch_err)?;
        info!("Watching {} for changes", path.display());

        Ok(Self { changed, path, _watcher: watcher })
    }

    #[inline]
    pub fn path(&self) -> &Path { &self.path }
}

impl ChangeNotifier for FileWatcher {
    fn poll_changed(&mut self) -> bool { self.changed.swap(false, Ordering::SeqCst) }
}

/// Data writes only. Creation, removal, renames and metadata changes are ignored.
fn is_content_modification(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any))
}

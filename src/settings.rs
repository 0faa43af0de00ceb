//! Persisted listing preferences.
//!
//! The listing page remembers its sort order and window between visits.
//! [`SettingsStore`] is the storage seam: the binary persists to a JSON
//! file, tests and stateless runs use the in-memory store.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DEFAULT_PAGE_LIMIT;
use crate::domain::sort::SortSpec;

/// Sort order and result window the listing page restores on entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingSettings {
    pub order_by: SortSpec,
    pub offset: usize,
    pub limit: usize,
}

impl Default for ListingSettings {
    /// First-visit settings: name ascending, first page, six items.
    fn default() -> Self {
        Self {
            order_by: SortSpec::default(),
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ListingSettings {
    /// Restores invariants on values read from storage: a zero-item
    /// window falls back to the default limit.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.limit == 0 {
            self.limit = DEFAULT_PAGE_LIMIT;
        }
        self
    }
}

#[derive(Debug, Error)]
/// Errors produced by settings stores.
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Storage seam for [`ListingSettings`].
pub trait SettingsStore {
    /// Loads the stored settings, `None` when nothing usable was saved yet.
    fn load(&self) -> SettingsResult<Option<ListingSettings>>;

    /// Persists the settings, replacing whatever was stored before.
    fn save(&self, settings: &ListingSettings) -> SettingsResult<()>;
}

/// Settings kept as one JSON document on disk.
#[derive(Clone, Debug)]
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStore for JsonFileSettings {
    fn load(&self) -> SettingsResult<Option<ListingSettings>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        // A corrupt file counts as nothing saved, the caller falls back
        // to the defaults.
        match serde_json::from_str::<ListingSettings>(&raw) {
            Ok(settings) => Ok(Some(settings.normalized())),
            Err(err) => {
                log::warn!(
                    "Discarding unreadable settings file {}: {err}",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }

    fn save(&self, settings: &ListingSettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }
}

/// In-memory store for tests and stateless runs.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    inner: Mutex<Option<ListingSettings>>,
}

impl InMemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemorySettings {
    fn load(&self) -> SettingsResult<Option<ListingSettings>> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.map(ListingSettings::normalized))
    }

    fn save(&self, settings: &ListingSettings) -> SettingsResult<()> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(*settings);
        Ok(())
    }
}

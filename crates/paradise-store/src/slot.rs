//! # Key-Value Slots
//!
//! The storage primitive behind [`CartStore`](crate::CartStore): named string
//! values, read whole and written whole.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         KeyValueSlot                                    │
//! │                                                                         │
//! │  MemorySlot                        FileSlot                             │
//! │  ──────────                        ────────                             │
//! │  HashMap<String, String>           <dir>/<key>.json                     │
//! │  optional byte capacity            created on first write               │
//! │  (simulates quota exceeded)        missing file = no value              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A synchronous, local key-value store.
pub trait KeyValueSlot {
    /// Returns the value under `key`, or `None` if nothing was written yet.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Lets a session pick its slot at runtime (`Box<dyn KeyValueSlot>`).
impl<S: KeyValueSlot + ?Sized> KeyValueSlot for Box<S> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }
}

// =============================================================================
// MemorySlot
// =============================================================================

/// In-memory slot, used for tests and for sessions without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
    capacity: Option<usize>,
}

impl MemorySlot {
    /// Creates an unbounded slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that rejects values longer than `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        MemorySlot {
            values: HashMap::new(),
            capacity: Some(capacity),
        }
    }

    /// Writes a raw value, bypassing the capacity check.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(capacity) = self.capacity {
            if value.len() > capacity {
                return Err(StoreError::QuotaExceeded {
                    needed: value.len(),
                    capacity,
                });
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// FileSlot
// =============================================================================

/// File-backed slot: one `<key>.json` file per key inside a directory.
///
/// ## Example
/// ```rust,ignore
/// let slot = FileSlot::new("/var/lib/paradise");
/// // cart lands in /var/lib/paradise/paradise_cart_v1.json
/// ```
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Creates a slot rooted at `dir`. The directory is created lazily.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlot { dir: dir.into() }
    }

    /// Creates a slot in the platform data directory.
    ///
    /// - Linux: `~/.local/share/storefront`
    /// - macOS: `~/Library/Application Support/com.paradise.storefront`
    pub fn in_default_dir() -> StoreResult<Self> {
        Self::default_dir()
            .map(FileSlot::new)
            .ok_or(StoreError::NoDataDir)
    }

    /// Returns the platform data directory, if one exists.
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "paradise", "storefront")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueSlot for FileSlot {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!(?path, "Slot file not found");
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;

        // Write-then-rename: readers never see a partially written cart
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(?path, bytes = value.len(), "Slot written");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

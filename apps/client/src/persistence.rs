//! Durable storage for the candidate's [`Context`].
//!
//! Reads never fail: missing or corrupt data yields `Context::default()`.
//! Writes are best-effort: failures are logged and swallowed so the analysis
//! flow is never blocked by storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::Context;

/// The single key the context is stored under.
pub const CONTEXT_STORAGE_KEY: &str = "fairdeal_context";

pub trait ContextStore: Send + Sync {
    /// Returns the stored context, or the default on missing/corrupt data.
    fn read(&self) -> Context;

    /// Persists the context. Storage failures are swallowed.
    fn write(&self, context: &Context);
}

// ────────────────────────────────────────────────────────────────────────────
// File-backed store
// ────────────────────────────────────────────────────────────────────────────

/// Stores the context as pretty JSON in `<dir>/fairdeal_context.json`.
#[derive(Debug, Clone)]
pub struct FileContextStore {
    path: PathBuf,
}

impl FileContextStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CONTEXT_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_read(&self) -> Result<Option<Context>, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn try_write(&self, context: &Context) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::Storage(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(context)?;
        // Write-then-rename so a crash mid-write never leaves a torn file behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| AppError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl ContextStore for FileContextStore {
    fn read(&self) -> Context {
        match self.try_read() {
            Ok(Some(context)) => context,
            Ok(None) => {
                debug!(path = %self.path.display(), "no stored context, using defaults");
                Context::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), "stored context unreadable, using defaults: {e}");
                Context::default()
            }
        }
    }

    fn write(&self, context: &Context) {
        if let Err(e) = self.try_write(context) {
            warn!(path = %self.path.display(), "failed to persist context: {e}");
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the serialized context in memory. Used when no state directory is
/// available and in tests; it stores JSON so it behaves like the file store.
#[derive(Debug, Default)]
pub struct MemoryContextStore {
    slot: Mutex<Option<String>>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw bytes, e.g. to simulate corrupt data.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }
}

impl ContextStore for MemoryContextStore {
    fn read(&self) -> Context {
        let slot = match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    fn write(&self, context: &Context) {
        match serde_json::to_string(context) {
            Ok(json) => {
                let mut slot = match self.slot.lock() {
                    Ok(slot) => slot,
                    Err(poisoned) => poisoned.into_inner(),
                };
                *slot = Some(json);
            }
            Err(e) => warn!("failed to serialize context: {e}"),
        }
    }
}

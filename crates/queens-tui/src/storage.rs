//! Persistence backend abstraction
//!
//! All durable app state (leaderboards, progression, settings, the saved
//! session) goes through one key/value store. Backends are selected by
//! environment:
//! - File: JSON file under the platform data directory
//! - Memory: in-memory mock for testing

#![allow(dead_code)]

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Normal runs - file-based storage
    Local,
    /// Testing - in-memory mock
    Test,
}

impl Environment {
    /// Detect environment from QUEENS_ENV variable
    pub fn detect() -> Self {
        match std::env::var("QUEENS_ENV").as_deref() {
            Ok("test") | Ok("testing") => Environment::Test,
            _ => Environment::Local,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Filesystem error
    Io(String),
    /// Serialization error
    Serde(String),
    /// Backend is not accepting requests
    Unavailable,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Storage I/O error: {}", e),
            Self::Serde(e) => write!(f, "Storage encoding error: {}", e),
            Self::Unavailable => write!(f, "Storage backend unavailable"),
        }
    }
}

/// Trait for key/value storage backends
pub trait StorageBackend: Send + Sync {
    /// Fetch the raw value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: Value) -> StorageResult<()>;

    /// Delete the value stored under `key`, if any
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check if backend is available
    fn is_available(&self) -> bool;

    /// Get backend name for display
    fn backend_name(&self) -> &'static str;
}

// ==================== File Backend ====================

/// JSON-file-backed store for normal runs
pub struct FileStorage {
    path: PathBuf,
    cache: Mutex<Option<FileData>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FileData {
    entries: HashMap<String, Value>,
}

impl FileStorage {
    pub fn new() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("queens")
            .join("storage.json");
        Self::with_path(path)
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    fn load(&self) -> FileData {
        let mut cache = self.cache.lock().unwrap();
        if let Some(ref data) = *cache {
            return data.clone();
        }

        let data = match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => FileData::default(),
        };

        *cache = Some(data.clone());
        data
    }

    fn save(&self, data: &FileData) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(data).map_err(|e| StorageError::Serde(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StorageError::Io(e.to_string()))?;

        *self.cache.lock().unwrap() = Some(data.clone());
        Ok(())
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.load().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        let mut data = self.load();
        data.entries.insert(key.to_string(), value);
        self.save(&data)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut data = self.load();
        if data.entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&data)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "File"
    }
}

// ==================== Memory Backend for Testing ====================

/// In-memory mock store for testing
pub struct MemoryStorage {
    data: Mutex<HashMap<String, Value>>,
    available: Mutex<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            available: Mutex::new(true),
        }
    }

    /// Set whether the backend should report as available
    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap() = available;
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.data.lock().unwrap().clear();
    }

    /// Get entry count
    pub fn count(&self) -> usize {
        self.data.lock().unwrap().len()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        if !*self.available.lock().unwrap() {
            return Err(StorageError::Unavailable);
        }
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        if !*self.available.lock().unwrap() {
            return Err(StorageError::Unavailable);
        }
        self.data.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        if !*self.available.lock().unwrap() {
            return Err(StorageError::Unavailable);
        }
        self.data.lock().unwrap().remove(key);
        Ok(())
    }

    fn is_available(&self) -> bool {
        *self.available.lock().unwrap()
    }

    fn backend_name(&self) -> &'static str {
        "Memory"
    }
}

// ==================== Backend Factory ====================

/// Create the appropriate backend based on environment
pub fn create_backend(env: Environment) -> Arc<dyn StorageBackend> {
    match env {
        Environment::Local => Arc::new(FileStorage::new()),
        Environment::Test => Arc::new(MemoryStorage::new()),
    }
}

// ==================== Typed Store ====================

/// Typed facade over a storage backend.
///
/// Reads degrade to `None` on any backend or decode failure, so corrupted
/// or missing state falls back to defaults instead of blocking the app.
/// Writes surface their errors for the status line.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}

impl Store {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Create with automatic environment detection
    pub fn auto() -> Self {
        Self::new(create_backend(Environment::detect()))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.backend
            .get(key)
            .ok()
            .flatten()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let value =
            serde_json::to_value(value).map_err(|e| StorageError::Serde(e.to_string()))?;
        self.backend.set(key, value)
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.backend.remove(key)
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let store = Store::new(Arc::new(MemoryStorage::new()));

        store.set("muted", &true).unwrap();
        store.set("unlocked_max", &7usize).unwrap();

        assert_eq!(store.get::<bool>("muted"), Some(true));
        assert_eq!(store.get::<usize>("unlocked_max"), Some(7));
        assert_eq!(store.get::<usize>("missing"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let backend = Arc::new(MemoryStorage::new());
        let store = Store::new(backend.clone());

        store.set("theme", &"ocean").unwrap();
        store.set("theme", &"neon").unwrap();

        assert_eq!(backend.count(), 1);
        assert_eq!(store.get::<String>("theme"), Some("neon".to_string()));
    }

    #[test]
    fn test_remove() {
        let store = Store::new(Arc::new(MemoryStorage::new()));
        store.set("saved_session", &42u32).unwrap();
        store.remove("saved_session").unwrap();
        assert_eq!(store.get::<u32>("saved_session"), None);
    }

    #[test]
    fn test_memory_unavailable() {
        let backend = Arc::new(MemoryStorage::new());
        backend.set_available(false);

        assert!(!backend.is_available());
        assert!(backend.set("k", Value::Null).is_err());

        // Typed reads degrade to None rather than failing.
        let store = Store::new(backend);
        assert_eq!(store.get::<bool>("k"), None);
    }

    #[test]
    fn test_wrong_type_reads_as_none() {
        let store = Store::new(Arc::new(MemoryStorage::new()));
        store.set("muted", &"not a bool").unwrap();
        assert_eq!(store.get::<bool>("muted"), None);
    }

    #[test]
    fn test_environment_detection() {
        // Default should be Local
        let env = Environment::detect();
        assert_eq!(env, Environment::Local);
    }

    #[test]
    fn test_file_backend() {
        let backend = FileStorage::new();
        assert!(backend.is_available());
        assert_eq!(backend.backend_name(), "File");
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("queens-storage-test-{}", std::process::id()))
            .join("storage.json");
        let backend = FileStorage::with_path(path.clone());

        backend
            .set("campaign_level", Value::from(3u32))
            .unwrap();
        assert_eq!(
            backend.get("campaign_level").unwrap(),
            Some(Value::from(3u32))
        );

        // A fresh instance re-reads from disk.
        let reopened = FileStorage::with_path(path.clone());
        assert_eq!(
            reopened.get("campaign_level").unwrap(),
            Some(Value::from(3u32))
        );

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(path.parent().unwrap());
    }
}

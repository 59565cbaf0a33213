use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::warn;

// Storage keys, kept identical to the browser client they replace.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLES_KEY: &str = "roles";

/// Persisted key-value state with explicit read/write/clear operations.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str);
    async fn remove(&self, key: &str);
    async fn clear(&self);
}

#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    async fn remove(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
    }

    async fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

/// File-backed store: the full map is rewritten as JSON on every mutation.
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Session file {} is not valid JSON: {}", path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    async fn persist(&self) {
        let snapshot = self.entries.read().unwrap().clone();
        let raw = serde_json::to_string_pretty(&snapshot)
            .expect("session map serializes to JSON");
        if let Err(e) = tokio::fs::write(&self.path, raw).await {
            warn!("Failed to persist session file {}: {}", self.path.display(), e);
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.persist().await;
    }

    async fn remove(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
        self.persist().await;
    }

    async fn clear(&self) {
        self.entries.write().unwrap().clear();
        self.persist().await;
    }
}

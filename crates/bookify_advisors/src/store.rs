// --- File: crates/bookify_advisors/src/store.rs ---
//! JSON-file-backed advisor store.
//!
//! Records live in memory behind an async RwLock and are snapshotted to a
//! flat JSON file on every mutation. Last write wins; there is no locking
//! across processes. The core only sees the [`AdvisorStore`] trait.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use bookify_common::models::Advisor;
use bookify_common::services::{AdvisorStore, BoxFuture};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::StoreError;

pub struct JsonAdvisorStore {
    path: PathBuf,
    advisors: RwLock<HashMap<String, Advisor>>,
}

impl JsonAdvisorStore {
    /// Open the store, reading existing records if the file is present.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let advisors: HashMap<String, Advisor> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(StoreError::Io(err)),
        };
        info!(
            "Loaded {} advisor(s) from {}",
            advisors.len(),
            path.display()
        );
        Ok(Self {
            path,
            advisors: RwLock::new(advisors),
        })
    }

    async fn persist(&self, snapshot: &HashMap<String, Advisor>) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

impl AdvisorStore for JsonAdvisorStore {
    type Error = StoreError;

    fn get(&self, id: &str) -> BoxFuture<'_, Option<Advisor>, Self::Error> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.advisors.read().await.get(&id).cloned()) })
    }

    fn list(&self) -> BoxFuture<'_, Vec<Advisor>, Self::Error> {
        Box::pin(async move { Ok(self.advisors.read().await.values().cloned().collect()) })
    }

    fn put(&self, advisor: Advisor) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            let snapshot = {
                let mut advisors = self.advisors.write().await;
                advisors.insert(advisor.id.clone(), advisor);
                advisors.clone()
            };
            self.persist(&snapshot).await
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let id = id.to_string();
        Box::pin(async move {
            let (existed, snapshot) = {
                let mut advisors = self.advisors.write().await;
                let existed = advisors.remove(&id).is_some();
                (existed, advisors.clone())
            };
            if existed {
                self.persist(&snapshot).await?;
            }
            Ok(existed)
        })
    }
}

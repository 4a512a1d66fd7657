use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{KeyValueStore, StoreError, PROJECTS_KEY};
use crate::models::Project;

/// Project records kept as a single JSON array in a [`KeyValueStore`].
///
/// Read-modify-write cycles are serialized; concurrent saves resolve as last write wins.
pub struct ProjectStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl ProjectStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// All records in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        match self.kv.get(PROJECTS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Project>, StoreError> {
        Ok(self.list_all().await?.into_iter().find(|p| p.id == id))
    }

    /// Insert or replace by id. `updatedAt` is always refreshed; `createdAt`
    /// is set on first insert and preserved afterwards.
    pub async fn upsert(&self, project: Project) -> Result<Project, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.list_all().await?;
        let now = Utc::now();

        let mut saved = project;
        saved.updated_at = now;
        match projects.iter_mut().find(|p| p.id == saved.id) {
            Some(existing) => {
                saved.created_at = existing.created_at;
                *existing = saved.clone();
            }
            None => {
                saved.created_at = now;
                projects.push(saved.clone());
            }
        }

        self.save_all(&projects).await?;
        Ok(saved)
    }

    /// Remove a record. Returns whether anything was deleted.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.list_all().await?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Ok(false);
        }
        self.save_all(&projects).await?;
        Ok(true)
    }

    async fn save_all(&self, projects: &[Project]) -> Result<(), StoreError> {
        let value: Value = serde_json::to_value(projects)?;
        self.kv.set(PROJECTS_KEY, value).await
    }
}

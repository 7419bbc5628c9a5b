//! In-memory `Store` used by the handler tests. Mirrors the Postgres
//! semantics: NULL never equals anything, and `asset_id` is unique among
//! non-NULL values.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::error::{AppError, AppResult};
use crate::models::{Asset, Credential};

#[derive(Default)]
pub struct MemoryStore {
    assets: RwLock<Vec<Asset>>,
    credentials: RwLock<Vec<Credential>>,
    next_id: AtomicI64,
}

fn sql_eq(column: Option<&str>, param: Option<&str>) -> bool {
    matches!((column, param), (Some(a), Some(b)) if a == b)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn asset_count(&self) -> usize {
        self.assets.read().await.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_assets(&self) -> AppResult<Vec<Asset>> {
        Ok(self.assets.read().await.clone())
    }

    async fn insert_asset(&self, asset: &Asset) -> AppResult<bool> {
        let mut assets = self.assets.write().await;
        let taken = assets
            .iter()
            .any(|a| sql_eq(a.asset_id.as_deref(), asset.asset_id.as_deref()));
        if taken {
            return Ok(false);
        }
        assets.push(asset.clone());
        Ok(true)
    }

    async fn update_asset(&self, original_asset_id: Option<&str>, asset: &Asset) -> AppResult<u64> {
        let mut assets = self.assets.write().await;
        let collides = assets.iter().any(|a| {
            !sql_eq(a.asset_id.as_deref(), original_asset_id)
                && sql_eq(a.asset_id.as_deref(), asset.asset_id.as_deref())
        });

        let mut affected = 0;
        for row in assets
            .iter_mut()
            .filter(|a| sql_eq(a.asset_id.as_deref(), original_asset_id))
        {
            if collides {
                return Err(AppError::duplicate_asset());
            }
            *row = asset.clone();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete_assets(&self, asset_id: Option<&str>) -> AppResult<u64> {
        let mut assets = self.assets.write().await;
        let before = assets.len();
        assets.retain(|a| !sql_eq(a.asset_id.as_deref(), asset_id));
        Ok((before - assets.len()) as u64)
    }

    async fn list_credentials(&self) -> AppResult<Vec<Credential>> {
        Ok(self.credentials.read().await.clone())
    }

    async fn find_credentials(&self, username: Option<&str>) -> AppResult<Vec<Credential>> {
        Ok(self
            .credentials
            .read()
            .await
            .iter()
            .filter(|c| sql_eq(c.username.as_deref(), username))
            .cloned()
            .collect())
    }

    async fn insert_credential(&self, username: &str, password_hash: &str) -> AppResult<()> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.credentials.write().await.push(Credential {
            id,
            username: Some(username.to_string()),
            password: Some(password_hash.to_string()),
        });
        Ok(())
    }

    async fn set_password(
        &self,
        username: Option<&str>,
        password_hash: Option<&str>,
    ) -> AppResult<u64> {
        let mut credentials = self.credentials.write().await;
        let mut affected = 0;
        for row in credentials
            .iter_mut()
            .filter(|c| sql_eq(c.username.as_deref(), username))
        {
            row.password = password_hash.map(str::to_string);
            affected += 1;
        }
        Ok(affected)
    }

    async fn rename_user(
        &self,
        old_username: Option<&str>,
        new_username: Option<&str>,
    ) -> AppResult<u64> {
        let mut credentials = self.credentials.write().await;
        let mut affected = 0;
        for row in credentials
            .iter_mut()
            .filter(|c| sql_eq(c.username.as_deref(), old_username))
        {
            row.username = new_username.map(str::to_string);
            affected += 1;
        }
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: Option<&str>) -> Asset {
        Asset {
            asset_id: id.map(str::to_string),
            ..Asset::default()
        }
    }

    #[tokio::test]
    async fn null_asset_ids_never_conflict() {
        let store = MemoryStore::new();
        assert!(store.insert_asset(&asset(None)).await.unwrap());
        assert!(store.insert_asset(&asset(None)).await.unwrap());
        assert_eq!(store.asset_count().await, 2);
        assert_eq!(store.delete_assets(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rename_onto_taken_id_conflicts() {
        let store = MemoryStore::new();
        store.insert_asset(&asset(Some("A"))).await.unwrap();
        store.insert_asset(&asset(Some("B"))).await.unwrap();
        let err = store
            .update_asset(Some("A"), &asset(Some("B")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        // Keeping its own id is not a collision.
        assert_eq!(store.update_asset(Some("A"), &asset(Some("A"))).await.unwrap(), 1);
    }
}

use tracing::info;

use crate::config::SeedCredential;
use crate::db::Store;
use crate::error::AppResult;
use crate::password;

/// Inserts the configured login unless a row with that username exists.
/// Returns whether a row was written.
pub async fn seed_credential(store: &dyn Store, seed: &SeedCredential) -> AppResult<bool> {
    let existing = store.find_credentials(Some(&seed.username)).await?;
    if !existing.is_empty() {
        info!(username = %seed.username, "Seed credential already present");
        return Ok(false);
    }

    let hash = password::hash_password_blocking(seed.password.clone()).await?;
    store.insert_credential(&seed.username, &hash).await?;
    info!(username = %seed.username, "Seeded credential");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    fn seed() -> SeedCredential {
        SeedCredential {
            username: "admin".to_string(),
            password: "changeme".to_string(),
        }
    }

    #[tokio::test]
    async fn seeds_once_with_a_hash() {
        let store = MemoryStore::new();
        assert!(seed_credential(&store, &seed()).await.unwrap());
        assert!(!seed_credential(&store, &seed()).await.unwrap());

        let rows = store.list_credentials().await.unwrap();
        assert_eq!(rows.len(), 1, "second run must not duplicate the seed row");
        let stored = rows[0].password.as_deref().unwrap();
        assert_ne!(stored, "changeme", "seeded password must not be stored in plaintext");
        assert!(password::verify_password("changeme", stored));
    }
}

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Asset, Credential};

#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::PgStore;

/// Data access for the asset and credential tables.
///
/// Lookups keyed by an `Option<&str>` follow SQL equality: `None` is NULL
/// and never matches anything.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> AppResult<()>;

    // ── Assets ────────────────────────────────────────────────────────────────

    async fn list_assets(&self) -> AppResult<Vec<Asset>>;

    /// Inserts unless a row with the same asset id exists. Returns `false`
    /// on conflict; the check and the write are one atomic step.
    async fn insert_asset(&self, asset: &Asset) -> AppResult<bool>;

    /// Overwrites every column of the rows whose asset id equals
    /// `original_asset_id`. Renaming onto a taken asset id is
    /// `AppError::Conflict`. Returns the affected-rows count.
    async fn update_asset(&self, original_asset_id: Option<&str>, asset: &Asset) -> AppResult<u64>;

    /// Returns the affected-rows count.
    async fn delete_assets(&self, asset_id: Option<&str>) -> AppResult<u64>;

    // ── Credentials ───────────────────────────────────────────────────────────

    async fn list_credentials(&self) -> AppResult<Vec<Credential>>;

    async fn find_credentials(&self, username: Option<&str>) -> AppResult<Vec<Credential>>;

    async fn insert_credential(&self, username: &str, password_hash: &str) -> AppResult<()>;

    async fn set_password(
        &self,
        username: Option<&str>,
        password_hash: Option<&str>,
    ) -> AppResult<u64>;

    /// Does not check that `new_username` is free.
    async fn rename_user(
        &self,
        old_username: Option<&str>,
        new_username: Option<&str>,
    ) -> AppResult<u64>;
}

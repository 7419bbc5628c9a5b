use async_trait::async_trait;
use sqlx::PgPool;

use super::Store;
use crate::error::{AppError, AppResult};
use crate::models::{Asset, Credential};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ── Assets ────────────────────────────────────────────────────────────────

    async fn list_assets(&self) -> AppResult<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(
            r#"
            SELECT install_date, supplied_by, supply_order_no, asset_id, make, model,
                   serial_number, location, department, remarks, item
            FROM assets
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }

    async fn insert_asset(&self, asset: &Asset) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO assets (
                install_date, supplied_by, supply_order_no, asset_id, make, model,
                serial_number, location, department, remarks, item
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (asset_id) DO NOTHING
            "#,
        )
        .bind(&asset.install_date)
        .bind(&asset.supplied_by)
        .bind(&asset.supply_order_no)
        .bind(&asset.asset_id)
        .bind(&asset.make)
        .bind(&asset.model)
        .bind(&asset.serial_number)
        .bind(&asset.location)
        .bind(&asset.department)
        .bind(&asset.remarks)
        .bind(&asset.item)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_asset(&self, original_asset_id: Option<&str>, asset: &Asset) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE assets
            SET install_date    = $1,
                supplied_by     = $2,
                supply_order_no = $3,
                asset_id        = $4,
                make            = $5,
                model           = $6,
                serial_number   = $7,
                location        = $8,
                department      = $9,
                remarks         = $10,
                item            = $11
            WHERE asset_id = $12
            "#,
        )
        .bind(&asset.install_date)
        .bind(&asset.supplied_by)
        .bind(&asset.supply_order_no)
        .bind(&asset.asset_id)
        .bind(&asset.make)
        .bind(&asset.model)
        .bind(&asset.serial_number)
        .bind(&asset.location)
        .bind(&asset.department)
        .bind(&asset.remarks)
        .bind(&asset.item)
        .bind(original_asset_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::duplicate_asset()
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(result.rows_affected())
    }

    async fn delete_assets(&self, asset_id: Option<&str>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM assets WHERE asset_id = $1")
            .bind(asset_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ── Credentials ───────────────────────────────────────────────────────────

    async fn list_credentials(&self) -> AppResult<Vec<Credential>> {
        let rows = sqlx::query_as::<_, Credential>(
            "SELECT id, username, password FROM credentials ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_credentials(&self, username: Option<&str>) -> AppResult<Vec<Credential>> {
        let rows = sqlx::query_as::<_, Credential>(
            "SELECT id, username, password FROM credentials WHERE username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert_credential(&self, username: &str, password_hash: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO credentials (username, password) VALUES ($1, $2)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_password(
        &self,
        username: Option<&str>,
        password_hash: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE credentials SET password = $1 WHERE username = $2")
            .bind(password_hash)
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn rename_user(
        &self,
        old_username: Option<&str>,
        new_username: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE credentials SET username = $1 WHERE username = $2")
            .bind(new_username)
            .bind(old_username)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

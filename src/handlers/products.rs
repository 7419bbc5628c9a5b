use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use super::{ok_message, AppJson};
use crate::{
    error::{AppError, AppResult},
    models::{Asset, AssetRef, AssetUpdate, LegacyItem},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Asset>>> {
    let start = Instant::now();
    let assets = state.store.list_assets().await?;

    info!(
        count = assets.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed assets"
    );

    Ok(Json(assets))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(asset): AppJson<Asset>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    if !state.store.insert_asset(&asset).await? {
        return Err(AppError::duplicate_asset());
    }

    info!(
        asset_id = asset.asset_id.as_deref().unwrap_or_default(),
        elapsed_ms = start.elapsed().as_millis(),
        "Created asset"
    );

    Ok(ok_message("Product added successfully!"))
}

pub async fn create_old_item(
    State(state): State<AppState>,
    AppJson(legacy): AppJson<LegacyItem>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let asset = Asset::from(legacy);
    if !state.store.insert_asset(&asset).await? {
        return Err(AppError::duplicate_asset());
    }

    info!(
        asset_id = asset.asset_id.as_deref().unwrap_or_default(),
        "Registered old item"
    );

    Ok(ok_message("Old item inserted successfully!"))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn out_item(
    State(state): State<AppState>,
    AppJson(target): AppJson<AssetRef>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let removed = state.store.delete_assets(target.asset_id.as_deref()).await?;
    if removed == 0 {
        return Err(AppError::NotFound(
            "No item found with provided Asset ID".to_string(),
        ));
    }

    info!(
        asset_id = target.asset_id.as_deref().unwrap_or_default(),
        removed,
        "Removed asset"
    );

    Ok(ok_message("Item deleted successfully!"))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    AppJson(update): AppJson<AssetUpdate>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let updated = state
        .store
        .update_asset(update.original_asset_id.as_deref(), &update.asset)
        .await?;
    if updated == 0 {
        return Err(AppError::NotFound("Asset ID not found".to_string()));
    }

    info!(
        original_asset_id = update.original_asset_id.as_deref().unwrap_or_default(),
        asset_id = update.asset.asset_id.as_deref().unwrap_or_default(),
        elapsed_ms = start.elapsed().as_millis(),
        "Updated asset"
    );

    Ok(ok_message("Product updated successfully!"))
}

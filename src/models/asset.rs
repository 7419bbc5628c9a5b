use serde::{Deserialize, Serialize};

use super::text::lenient_text;

/// One tracked piece of equipment. Every column is nullable; missing JSON
/// fields become SQL NULL. Serialized under the camelCase aliases the
/// frontend reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Asset {
    #[serde(deserialize_with = "lenient_text")]
    pub install_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub supplied_by: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub supply_order_no: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub asset_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub make: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub serial_number: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub department: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub remarks: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub item: Option<String>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /api/old-item`: a pre-existing item registered with only
/// the four attributes known for it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyItem {
    #[serde(deserialize_with = "lenient_text")]
    pub asset_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub make: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub item: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub remarks: Option<String>,
}

impl From<LegacyItem> for Asset {
    fn from(legacy: LegacyItem) -> Self {
        Asset {
            asset_id: legacy.asset_id,
            make: legacy.make,
            item: legacy.item,
            remarks: legacy.remarks,
            ..Asset::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetRef {
    #[serde(deserialize_with = "lenient_text")]
    pub asset_id: Option<String>,
}

/// Body of `PUT /api/update-product`. `original_asset_id` selects the row;
/// the embedded asset (including its `assetId`) replaces every column.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetUpdate {
    #[serde(deserialize_with = "lenient_text")]
    pub original_asset_id: Option<String>,
    #[serde(flatten)]
    pub asset: Asset,
}

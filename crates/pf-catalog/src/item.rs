use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pf_entity::EntityKey;
use serde::{Deserialize, Serialize};

/// Localized values keyed by country code, e.g. "NEUTRAL" or "en-US"
pub type Dictionary<T> = HashMap<String, T>;

/// Key of the locale-independent entry of a [`Dictionary`]
pub const NEUTRAL: &str = "NEUTRAL";

/// High-level item types
pub mod item_type {
    pub const BUNDLE: &str = "bundle";
    pub const CATALOG_ITEM: &str = "catalogItem";
    pub const CURRENCY: &str = "currency";
    pub const STORE: &str = "store";
    pub const UGC: &str = "ugc";
}

/// Image types; an item has at most one thumbnail
pub mod image_type {
    pub const THUMBNAIL: &str = "thumbnail";
    pub const SCREENSHOT: &str = "screenshot";
}

/// Moderation statuses
pub mod moderation_status {
    pub const APPROVED: &str = "Approved";
    pub const AWAITING_MODERATION: &str = "AwaitingModeration";
    pub const REJECTED: &str = "Rejected";
    pub const UNKNOWN: &str = "Unknown";
}

/// Catalog item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Item {
    /// "FriendlyId" or marketplace specific IDs
    pub alternate_ids: Vec<AlternateId>,
    /// Client-defined type of the item
    pub content_type: String,
    /// Up to 100 files. In Minecraft these point at encrypted pack archives.
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_entity: Option<EntityKey>,
    pub deep_links: Vec<DeepLink>,
    /// Static stack ID, or "{GUID}" for a unique one per grant
    pub default_stack_id: String,
    pub description: Dictionary<String>,
    /// Arbitrary game-specific JSON
    pub display_properties: HashMap<String, serde_json::Value>,
    pub display_version: String,
    /// Value for the `If-None-Match` header
    #[serde(rename = "ETag")]
    pub etag: String,
    /// None means available indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub id: String,
    pub images: Vec<Image>,
    #[serde(rename = "IsHidden")]
    pub hidden: bool,
    pub item_references: Vec<ItemReference>,
    pub keywords: Dictionary<Keywords>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    pub moderation: ModerationState,
    pub platforms: Vec<String>,
    pub price_options: PriceOptions,
    pub rating: Rating,
    /// None means available immediately
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    pub store_details: StoreDetails,
    pub tags: Vec<String>,
    pub title: Dictionary<String>,
    /// One of [`item_type`]
    #[serde(rename = "Type")]
    pub item_type: String,
}

impl Item {
    /// Title in `locale`, falling back to the neutral title
    pub fn localized_title(&self, locale: &str) -> Option<&str> {
        self.title
            .get(locale)
            .or_else(|| self.title.get(NEUTRAL))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StoreReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<AlternateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlternateId {
    #[serde(rename = "Type")]
    pub id_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Content {
    pub id: String,
    /// Up to 3 dot separated segments, each at most 65535
    pub max_client_version: String,
    pub min_client_version: String,
    pub tags: Vec<String>,
    #[serde(rename = "Type")]
    pub content_type: String,
    /// CDN URL of the binary content
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeepLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Image {
    pub id: String,
    pub tag: String,
    /// One of [`image_type`]
    #[serde(rename = "Type")]
    pub image_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemReference {
    pub amount: i64,
    pub id: String,
    pub price_options: PriceOptions,
}

/// Prices, wrapped as `{"Prices": [...]}` on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriceOptions {
    pub prices: Vec<Price>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Price {
    /// Up to 15 amounts
    pub amounts: Vec<PriceAmount>,
    pub unit_amount: i64,
    pub unit_duration_in_seconds: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriceAmount {
    pub amount: i64,
    pub item_id: String,
}

/// Keywords of one locale, wrapped as `{"Values": [...]}` on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Keywords {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModerationState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    pub reason: String,
    /// One of [`moderation_status`]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Rating {
    pub average: f32,
    pub count1_star: i64,
    pub count2_star: i64,
    pub count3_star: i64,
    pub count4_star: i64,
    pub count5_star: i64,
    pub total_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StoreDetails {
    /// Mutually exclusive with item references
    pub filter_options: FilterOptions,
    /// Mutually exclusive with the price options of item references
    pub price_options_override: PriceOptionsOverride,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FilterOptions {
    pub filter: String,
    pub include_all_items: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriceOptionsOverride {
    pub prices: Vec<PriceOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriceOverride {
    pub amounts: Vec<PriceAmountOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriceAmountOverride {
    pub fixed_value: i64,
    pub item_id: String,
    pub multiplier: i64,
}

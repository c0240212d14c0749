use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a menu.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/menu-response.ts")]
pub struct MenuResponse {
    pub id: String,
    pub site_id: String,
    pub name: String,
    pub location: String,
    pub items: Vec<MenuItemPayload>,
    /// Send back as `expected_version` to detect concurrent edits.
    #[ts(type = "number")]
    pub version: u64,
    pub updated_at: String,
}

/// Menu item node as exchanged with the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api-types/menu-item-payload.ts")]
pub struct MenuItemPayload {
    pub id: String,
    pub label: String,
    pub url: String,
    /// One of `page`, `post`, `custom`, `category`.
    pub item_type: String,
    /// `_self` or `_blank`.
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default)]
    pub children: Vec<MenuItemPayload>,
}

fn default_target() -> String {
    "_self".to_owned()
}

/// Incoming payload for menu creation.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/create-menu-request.ts")]
pub struct CreateMenuRequest {
    pub name: String,
    pub location: String,
}

/// Incoming payload for saving the whole menu.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/save-menu-request.ts")]
pub struct SaveMenuRequest {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub items: Vec<MenuItemPayload>,
    /// Omit to overwrite regardless of concurrent edits.
    #[serde(default)]
    #[ts(type = "number | null")]
    pub expected_version: Option<u64>,
}

/// Incoming payload for deriving an item from a page or post.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/derive-menu-item-request.ts")]
pub struct DeriveMenuItemRequest {
    /// `page` or `post`.
    pub kind: String,
    pub content_id: String,
    #[serde(default)]
    pub target: Option<String>,
}

//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Public menu item as served by the menu endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Item reference (String ID)
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in currency unit
    pub price: f64,
    #[serde(default)]
    pub image: Vec<String>,
    #[serde(default)]
    pub bestseller: bool,
}

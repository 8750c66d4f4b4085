//! Cart Model

use serde::{Deserialize, Serialize};

use super::menu_item::MenuItem;

/// One menu item plus quantity within a cart
///
/// Invariants (enforced by the session manager, relied on here):
/// - no two lines in a cart share `item_id`
/// - `quantity >= 1`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Menu item reference (String ID)
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price in currency unit
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub image: Vec<String>,
}

impl CartLine {
    /// Build a fresh line (quantity 1) from a menu item
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            quantity: 1,
            image: item.image.clone(),
        }
    }

    /// Line total in currency unit
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

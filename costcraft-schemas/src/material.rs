use serde::{Deserialize, Serialize};

/// One line item in a product's bill of materials.
///
/// Serialized field names (`name` / `quantity` / `costPerUnit`) are the
/// persisted JSON layout and must stay stable for compatibility with
/// previously stored estimations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: String,
    pub quantity: f64,
    pub cost_per_unit: f64,
}

impl Material {
    /// Total cost contributed by this line item.
    pub fn subtotal(&self) -> f64 {
        self.quantity * self.cost_per_unit
    }
}

/// Per-unit cost range for one material in the reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

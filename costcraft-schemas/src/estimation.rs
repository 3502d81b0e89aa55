use crate::material::Material;
use serde::{Deserialize, Serialize};

/// Computed cost range for a product. Derived on every change to the draft,
/// persisted only as part of a [`SavedEstimation`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub min: f64,
    pub max: f64,
}

impl CostEstimate {
    /// Midpoint of the range, the basis for the suggested retail price.
    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// A finished estimation as handed to the record store, before an id and
/// timestamp are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationDraft {
    pub name: String,
    pub description: String,
    pub materials: Vec<Material>,
    pub labor_cost: f64,
    pub other_costs: f64,
    pub profit_margin: u32,
    pub estimated_cost: CostEstimate,
    pub suggested_price: f64,
}

/// The persisted unit of record. Never mutated in place; the store only
/// creates, lists and deletes these.
///
/// Field names serialize in camelCase to match the stored JSON layout
/// (`laborCost`, `estimatedCost`, `createdAt`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEstimation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub materials: Vec<Material>,
    pub labor_cost: f64,
    pub other_costs: f64,
    pub profit_margin: u32,
    pub estimated_cost: CostEstimate,
    pub suggested_price: f64,
    /// ISO-8601 UTC timestamp, set at save time, immutable thereafter.
    pub created_at: String,
}

impl SavedEstimation {
    /// Builds the persisted record from a draft plus generated identity.
    pub fn from_draft(draft: EstimationDraft, id: String, created_at: String) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            materials: draft.materials,
            labor_cost: draft.labor_cost,
            other_costs: draft.other_costs,
            profit_margin: draft.profit_margin,
            estimated_cost: draft.estimated_cost,
            suggested_price: draft.suggested_price,
            created_at,
        }
    }
}

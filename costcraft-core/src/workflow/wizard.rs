//! The product estimation wizard: collects product identity, materials and
//! costs across three steps, recomputing the cost range on every change, and
//! hands a finished snapshot to the record store on save.

use crate::catalog::MaterialCatalog;
use crate::error::CostcraftError;
use crate::pricing;
use crate::storage::KeyValueStorage;
use crate::store::RecordStore;
use crate::workflow::state::{DraftProduct, FieldErrors, Step};
use costcraft_schemas::estimation::{CostEstimate, EstimationDraft, SavedEstimation};
use costcraft_schemas::material::Material;

const DEFAULT_PROFIT_MARGIN: u32 = 30;

pub struct EstimationWizard {
    catalog: MaterialCatalog,
    step: Step,
    draft: DraftProduct,
    profit_margin: u32,
    errors: FieldErrors,
}

impl EstimationWizard {
    pub fn new(catalog: MaterialCatalog) -> Self {
        Self {
            catalog,
            step: Step::Details,
            draft: DraftProduct::default(),
            profit_margin: DEFAULT_PROFIT_MARGIN,
            errors: FieldErrors::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &DraftProduct {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn profit_margin(&self) -> u32 {
        self.profit_margin
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.draft.description = description.to_string();
    }

    pub fn set_category(&mut self, category: &str) {
        self.draft.category = category.to_string();
    }

    /// Adds a material row to the draft.
    ///
    /// An invalid quantity falls back to 1. When no cost-per-unit is given
    /// the catalog midpoint is used; an unknown material without an explicit
    /// cost is rejected rather than silently priced at zero. A freeform name
    /// with an explicit cost is accepted.
    pub fn add_material(
        &mut self,
        name: &str,
        quantity: f64,
        cost_per_unit: Option<f64>,
    ) -> Result<(), CostcraftError> {
        if name.trim().is_empty() {
            return Err(CostcraftError::validation("material", "Select a material"));
        }

        let quantity = if quantity.is_finite() && quantity > 0.0 {
            quantity
        } else {
            1.0
        };

        let cost_per_unit = match cost_per_unit {
            Some(cost) if cost.is_finite() && cost > 0.0 => cost,
            _ => self
                .catalog
                .default_cost_per_unit(name)
                .ok_or_else(|| CostcraftError::MaterialNotFound(name.to_string()))?,
        };

        self.draft.materials.push(Material {
            name: name.to_string(),
            quantity,
            cost_per_unit,
        });
        self.errors.materials = None;
        Ok(())
    }

    /// Removes the material row at `index`. Out-of-range indices are ignored.
    pub fn remove_material(&mut self, index: usize) -> bool {
        if index < self.draft.materials.len() {
            self.draft.materials.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_labor_cost(&mut self, labor_cost: f64) {
        self.draft.labor_cost = sanitize_cost(labor_cost);
    }

    pub fn set_other_costs(&mut self, other_costs: f64) {
        self.draft.other_costs = sanitize_cost(other_costs);
    }

    /// Sets the profit margin, clamped into the allowed [10, 100] band.
    pub fn set_profit_margin(&mut self, profit_margin: u32) {
        self.profit_margin = pricing::clamp_profit_margin(profit_margin);
    }

    /// Current cost range, recomputed from the draft.
    pub fn estimated_cost(&self) -> CostEstimate {
        pricing::estimate(
            &self.draft.materials,
            self.draft.labor_cost,
            self.draft.other_costs,
        )
    }

    /// Suggested retail price at the current margin.
    pub fn suggested_price(&self) -> f64 {
        pricing::suggested_price(&self.estimated_cost(), self.profit_margin)
    }

    /// Advances to the next step. Leaving `Details` requires a product name
    /// and at least one material; on failure the step is kept and the field
    /// errors are populated. `Pricing` is terminal.
    pub fn advance(&mut self) -> bool {
        match self.step {
            Step::Details => {
                if self.validate_details() {
                    self.step = Step::Costs;
                    true
                } else {
                    false
                }
            }
            Step::Costs => {
                self.step = Step::Pricing;
                true
            }
            Step::Pricing => false,
        }
    }

    /// Steps back, never below `Details`.
    pub fn back(&mut self) {
        self.step = self.step.previous();
    }

    /// Persists the current draft under `name` and resets the wizard on
    /// success. On failure the draft is retained so nothing is lost.
    pub fn save<S: KeyValueStorage>(
        &mut self,
        store: &mut RecordStore<S>,
        name: &str,
        description: &str,
    ) -> Result<SavedEstimation, CostcraftError> {
        if name.trim().is_empty() {
            return Err(CostcraftError::validation(
                "name",
                "Please provide a name for this estimation",
            ));
        }

        let estimated_cost = self.estimated_cost();
        let draft = EstimationDraft {
            name: name.trim().to_string(),
            description: description.to_string(),
            materials: self.draft.materials.clone(),
            labor_cost: self.draft.labor_cost,
            other_costs: self.draft.other_costs,
            profit_margin: self.profit_margin,
            estimated_cost,
            suggested_price: pricing::suggested_price(&estimated_cost, self.profit_margin),
        };

        let saved = store.save_estimation(draft)?;
        self.reset();
        Ok(saved)
    }

    /// Discards the draft and returns to a fresh `Details` step.
    pub fn reset(&mut self) {
        self.draft = DraftProduct::default();
        self.step = Step::Details;
        self.profit_margin = DEFAULT_PROFIT_MARGIN;
        self.errors = FieldErrors::default();
    }

    fn validate_details(&mut self) -> bool {
        self.errors = FieldErrors {
            name: if self.draft.name.trim().is_empty() {
                Some("Product name is required".to_string())
            } else {
                None
            },
            materials: if self.draft.materials.is_empty() {
                Some("At least one material is required".to_string())
            } else {
                None
            },
        };
        self.errors.is_clean()
    }
}

fn sanitize_cost(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn wizard() -> EstimationWizard {
        EstimationWizard::new(MaterialCatalog::builtin())
    }

    #[test]
    fn details_step_guards_advance() {
        let mut w = wizard();
        assert!(!w.advance());
        assert_eq!(w.step(), Step::Details);
        assert!(w.errors().name.is_some());
        assert!(w.errors().materials.is_some());

        w.set_name("Eco-friendly Water Bottle");
        assert!(!w.advance());
        assert!(w.errors().name.is_none());
        assert!(w.errors().materials.is_some());

        w.add_material("Plastic", 2.0, None).unwrap();
        assert!(w.advance());
        assert_eq!(w.step(), Step::Costs);
        assert!(w.errors().is_clean());
    }

    #[test]
    fn costs_step_advances_unconditionally_and_pricing_is_terminal() {
        let mut w = wizard();
        w.set_name("Bottle");
        w.add_material("Plastic", 1.0, None).unwrap();
        assert!(w.advance());
        assert!(w.advance());
        assert_eq!(w.step(), Step::Pricing);
        assert!(!w.advance());
        assert_eq!(w.step(), Step::Pricing);
    }

    #[test]
    fn back_saturates_at_details() {
        let mut w = wizard();
        w.back();
        assert_eq!(w.step(), Step::Details);

        w.set_name("Bottle");
        w.add_material("Plastic", 1.0, None).unwrap();
        w.advance();
        w.advance();
        w.back();
        assert_eq!(w.step(), Step::Costs);
        w.back();
        assert_eq!(w.step(), Step::Details);
        w.back();
        assert_eq!(w.step(), Step::Details);
    }

    #[test]
    fn add_material_defaults_to_catalog_midpoint() {
        let mut w = wizard();
        w.add_material("Plastic", 2.0, None).unwrap();
        let m = &w.draft().materials[0];
        assert_eq!(m.cost_per_unit, 450.0);
        assert_eq!(m.quantity, 2.0);
    }

    #[test]
    fn add_material_sanitizes_quantity_to_one() {
        let mut w = wizard();
        w.add_material("Plastic", 0.0, Some(5.0)).unwrap();
        w.add_material("Plastic", f64::NAN, Some(5.0)).unwrap();
        assert_eq!(w.draft().materials[0].quantity, 1.0);
        assert_eq!(w.draft().materials[1].quantity, 1.0);
    }

    #[test]
    fn unknown_material_without_cost_is_rejected() {
        let mut w = wizard();
        let err = w.add_material("Unobtainium", 1.0, None).unwrap_err();
        assert!(matches!(err, CostcraftError::MaterialNotFound(_)));
        assert!(w.draft().materials.is_empty());
    }

    #[test]
    fn freeform_material_with_explicit_cost_is_accepted() {
        let mut w = wizard();
        w.add_material("Bamboo", 3.0, Some(200.0)).unwrap();
        assert_eq!(w.draft().materials[0].cost_per_unit, 200.0);
    }

    #[test]
    fn remove_material_ignores_out_of_range() {
        let mut w = wizard();
        w.add_material("Plastic", 2.0, None).unwrap();
        assert!(!w.remove_material(5));
        assert!(w.remove_material(0));
        assert!(w.draft().materials.is_empty());
    }

    #[test]
    fn estimate_tracks_every_mutation() {
        let mut w = wizard();
        assert_eq!(w.estimated_cost(), CostEstimate { min: 0.0, max: 0.0 });

        w.add_material("Plastic", 2.0, Some(5.0)).unwrap();
        w.set_labor_cost(10.0);
        let est = w.estimated_cost();
        assert_eq!(est.min, 19.0);
        assert_eq!(est.max, 24.0);

        w.remove_material(0);
        let est = w.estimated_cost();
        assert_eq!(est.min, 10.0);
        assert_eq!(est.max, 12.0);
    }

    #[test]
    fn profit_margin_is_clamped() {
        let mut w = wizard();
        assert_eq!(w.profit_margin(), 30);
        w.set_profit_margin(5);
        assert_eq!(w.profit_margin(), 10);
        w.set_profit_margin(150);
        assert_eq!(w.profit_margin(), 100);
    }

    #[test]
    fn save_persists_snapshot_and_resets() {
        let mut w = wizard();
        let mut store = RecordStore::new(MemoryStorage::new());

        w.set_name("Bottle");
        w.add_material("Plastic", 2.0, Some(5.0)).unwrap();
        w.set_labor_cost(10.0);
        w.advance();
        w.advance();

        let saved = w.save(&mut store, "Bottle v1", "first pass").unwrap();
        assert_eq!(saved.name, "Bottle v1");
        assert_eq!(saved.estimated_cost.min, 19.0);
        assert_eq!(saved.estimated_cost.max, 24.0);
        assert_eq!(saved.suggested_price, 28.0);
        assert_eq!(saved.materials.len(), 1);

        // Draft cleared, wizard back at the first step.
        assert_eq!(w.step(), Step::Details);
        assert!(w.draft().materials.is_empty());
        assert!(w.draft().name.is_empty());
        assert_eq!(store.estimations().len(), 1);
    }

    #[test]
    fn failed_save_keeps_draft_and_step() {
        use crate::storage::FailingStorage;

        let mut storage = FailingStorage::new();
        storage.fail_writes = true;
        let mut store = RecordStore::new(storage);

        let mut w = wizard();
        w.set_name("Bottle");
        w.add_material("Plastic", 2.0, Some(5.0)).unwrap();
        w.advance();
        w.advance();

        let err = w.save(&mut store, "Bottle v1", "").unwrap_err();
        assert!(matches!(err, CostcraftError::Storage(..)));

        // Nothing lost: the draft and step survive the failure.
        assert_eq!(w.step(), Step::Pricing);
        assert_eq!(w.draft().name, "Bottle");
        assert_eq!(w.draft().materials.len(), 1);
        assert!(store.estimations().is_empty());
    }

    #[test]
    fn save_without_name_keeps_draft() {
        let mut w = wizard();
        let mut store = RecordStore::new(MemoryStorage::new());

        w.set_name("Bottle");
        w.add_material("Plastic", 2.0, None).unwrap();

        let err = w.save(&mut store, "  ", "").unwrap_err();
        assert!(matches!(err, CostcraftError::Validation { .. }));
        assert_eq!(w.draft().materials.len(), 1);
        assert!(store.estimations().is_empty());
    }
}

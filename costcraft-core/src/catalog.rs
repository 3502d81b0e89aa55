use costcraft_schemas::material::CatalogEntry;
use std::collections::HashMap;

/// Static reference table of per-unit cost ranges by material name.
///
/// Consulted only when a material is added to a draft: the default
/// cost-per-unit for a selection is the rounded midpoint of the entry's
/// min/max range, fixed at the moment of the add. Later catalog changes
/// never retroactively alter saved records.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl MaterialCatalog {
    /// Builds a catalog from a list of entries. Later entries with a
    /// duplicate name replace earlier ones.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (e.name.clone(), e))
            .collect();
        Self { entries }
    }

    /// The built-in catalog of eight common materials, with per-unit cost
    /// ranges in INR.
    pub fn builtin() -> Self {
        let table: [(&str, f64, f64, &str); 8] = [
            ("Plastic", 150.0, 750.0, "kg"),
            ("Metal", 375.0, 2250.0, "kg"),
            ("Wood", 225.0, 1125.0, "kg"),
            ("Fabric", 375.0, 1875.0, "m²"),
            ("Electronics", 750.0, 15000.0, "unit"),
            ("Glass", 600.0, 3000.0, "m²"),
            ("Rubber", 300.0, 1500.0, "kg"),
            ("Paper/Cardboard", 75.0, 375.0, "kg"),
        ];
        Self::from_entries(
            table
                .iter()
                .map(|(name, min, max, unit)| CatalogEntry {
                    name: name.to_string(),
                    min: *min,
                    max: *max,
                    unit: unit.to_string(),
                })
                .collect(),
        )
    }

    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Default cost-per-unit for a material: the rounded midpoint of its
    /// catalog range. `None` for unknown names.
    pub fn default_cost_per_unit(&self, name: &str) -> Option<f64> {
        self.lookup(name).map(|e| ((e.min + e.max) / 2.0).round())
    }

    /// Material names in alphabetical order, for display.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

use anyhow::{Context, Result};
use costcraft_core::catalog::MaterialCatalog;
use costcraft_schemas::{
    file_formats::{CatalogFile, IndustryFile},
    industry::Industry,
};
use std::{fs, path::Path};

/// All static reference data the application works against: the material
/// catalog and the industry directory.
pub struct ReferenceData {
    pub catalog: MaterialCatalog,
    pub industries: Vec<Industry>,
}

impl ReferenceData {
    /// Loads reference data from YAML files under the given base directory.
    ///
    /// Falls back to the built-in catalog when no catalog files are present,
    /// so the tool works out of the box without a data directory.
    pub fn load(base_path: &Path) -> Result<Self> {
        let entries = load_yaml_files(
            &base_path.join("catalog"),
            |file: CatalogFile| file.materials,
        )?;
        let catalog = if entries.is_empty() {
            MaterialCatalog::builtin()
        } else {
            MaterialCatalog::from_entries(entries)
        };

        let mut industries = load_yaml_files(
            &base_path.join("industries"),
            |file: IndustryFile| file.industries,
        )?;
        industries.sort_by_key(|i| i.id);

        Ok(Self {
            catalog,
            industries,
        })
    }
}

/// Generic helper to load and concatenate all YAML files in a directory.
/// A missing directory yields an empty collection.
fn load_yaml_files<F, E, T>(dir_path: &Path, extract_vec: E) -> Result<Vec<T>>
where
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., CatalogFile)
    E: Fn(F) -> Vec<T>,                  // A closure to extract the Vec<T> from the wrapper
{
    let mut items = Vec::new();
    if !dir_path.is_dir() {
        return Ok(items);
    }

    for entry in fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory: {:?}", dir_path))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            let content = fs::read_to_string(&path)?;
            let file_wrapper: F = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
            items.extend(extract_vec(file_wrapper));
        }
    }
    Ok(items)
}

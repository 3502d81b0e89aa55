use crate::{industry::Industry, material::CatalogEntry};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub schema_version: String,
    pub materials: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct IndustryFile {
    pub schema_version: String,
    pub industries: Vec<Industry>,
}

//! Vaccine catalog
//!
//! The catalog is the read-only reference list of vaccines, doses and
//! recommended timing. It is loaded once and shared; a reload produces a new
//! [`VaccineCatalog`] value rather than mutating the old one, and schedules
//! generated from the old value stay as they were.
//!
//! # Example
//!
//! ```rust
//! use immunize::core::catalog::VaccineCatalog;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = VaccineCatalog::builtin()?;
//! assert!(!catalog.is_empty());
//! println!("catalog {} ({})", catalog.version().unwrap_or("-"), catalog.fingerprint()?);
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod fingerprint;
pub mod validate;

pub use document::{load_catalog, CatalogDocument, CatalogFormat, DoseDocument, SeriesDocument};
pub use fingerprint::fingerprint_definitions;
pub use validate::validate_definitions;

use crate::domain::{CatalogError, Result, VaccineDefinition, VaccineId};
use std::collections::BTreeSet;
use std::sync::Arc;

const BUILTIN_CATALOG: &str = include_str!("builtin_catalog.json");

/// Immutable, cheaply clonable set of vaccine definitions
#[derive(Debug, Clone)]
pub struct VaccineCatalog {
    version: Option<String>,
    definitions: Arc<[VaccineDefinition]>,
}

impl VaccineCatalog {
    /// Creates a validated catalog
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ImmunizeError::InvalidCatalog`] if any
    /// definition violates a catalog invariant.
    pub fn new(definitions: Vec<VaccineDefinition>) -> Result<Self> {
        let catalog = Self::from_definitions(definitions);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Wraps definitions without validating them
    ///
    /// Schedule generation validates before use, so an invalid catalog built
    /// this way is still rejected, just later.
    pub fn from_definitions(definitions: Vec<VaccineDefinition>) -> Self {
        Self {
            version: None,
            definitions: definitions.into(),
        }
    }

    /// The catalog embedded in the crate (national childhood schedule)
    pub fn builtin() -> Result<Self> {
        CatalogDocument::parse(BUILTIN_CATALOG, CatalogFormat::Json)?.into_catalog()
    }

    /// Sets the version label
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Version label from the source document, if any
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// All definitions, in source order
    pub fn definitions(&self) -> &[VaccineDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Checks the catalog invariants
    pub fn validate(&self) -> std::result::Result<(), CatalogError> {
        validate_definitions(&self.definitions)
    }

    /// SHA-256 fingerprint of the definitions
    pub fn fingerprint(&self) -> Result<String> {
        fingerprint_definitions(&self.definitions)
    }

    /// Doses of one series, in source order
    pub fn series<'a>(
        &'a self,
        vaccine_id: &'a VaccineId,
    ) -> impl Iterator<Item = &'a VaccineDefinition> + 'a {
        self.definitions
            .iter()
            .filter(move |d| &d.vaccine_id == vaccine_id)
    }

    /// Distinct vaccine ids, sorted
    pub fn vaccine_ids(&self) -> BTreeSet<&VaccineId> {
        self.definitions.iter().map(|d| &d.vaccine_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImmunizeError;

    fn dose(id: &str, dose_number: u32, days: i64) -> VaccineDefinition {
        VaccineDefinition::builder()
            .vaccine_id(id)
            .name(id)
            .dose_number(dose_number)
            .age_days(days)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = VaccineCatalog::builtin().unwrap();
        assert_eq!(catalog.version(), Some("2025.1"));
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.vaccine_ids().len(), 14);

        let flu = VaccineId::new("flu").unwrap();
        let flu_doses: Vec<_> = catalog.series(&flu).collect();
        assert_eq!(flu_doses.len(), 1);
        assert!(flu_doses[0].is_annual);
        assert_eq!(flu_doses[0].recommended_age_days, 184);
    }

    #[test]
    fn test_new_rejects_invalid() {
        let result = VaccineCatalog::new(vec![dose("hepb", 1, -3)]);
        assert!(matches!(
            result,
            Err(ImmunizeError::InvalidCatalog(CatalogError::NegativeAgeOffset { .. }))
        ));
    }

    #[test]
    fn test_from_definitions_defers_validation() {
        let catalog = VaccineCatalog::from_definitions(vec![dose("hepb", 1, -3)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_clone_shares_definitions() {
        let catalog = VaccineCatalog::new(vec![dose("hepb", 1, 0)]).unwrap();
        let copy = catalog.clone();
        assert!(std::ptr::eq(
            catalog.definitions().as_ptr(),
            copy.definitions().as_ptr()
        ));
        assert_eq!(catalog.fingerprint().unwrap(), copy.fingerprint().unwrap());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = VaccineCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.vaccine_ids().is_empty());
    }
}

//! On-disk catalog documents
//!
//! Catalog files group doses under their vaccine series, the way published
//! immunization tables are laid out. Loading flattens every dose into a
//! [`VaccineDefinition`] and validates the result.
//!
//! ```json
//! {
//!   "version": "2025.1",
//!   "vaccines": [
//!     {
//!       "id": "hepb",
//!       "name": "Hepatitis B",
//!       "disease": "Hepatitis B",
//!       "mandatory": true,
//!       "doses": [
//!         { "dose_number": 1, "age": "at birth" },
//!         { "dose_number": 2, "age": "at 1 month" },
//!         { "dose_number": 3, "age_days": 180 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use super::VaccineCatalog;
use crate::domain::{
    CatalogError, Gender, ImmunizeError, RecommendedAge, Result, VaccineDefinition, VaccineId,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialization format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// Picks the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(CatalogFormat::Json),
            Some("toml") => Ok(CatalogFormat::Toml),
            _ => Err(ImmunizeError::Configuration(format!(
                "Unsupported catalog file extension: {} (expected .json or .toml)",
                path.display()
            ))),
        }
    }
}

/// Root of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Free-form catalog version, e.g. the schedule's publication year
    #[serde(default)]
    pub version: Option<String>,

    pub vaccines: Vec<SeriesDocument>,
}

/// One vaccine series and its doses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDocument {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub disease: String,

    /// Default for every dose in the series
    #[serde(default)]
    pub mandatory: bool,

    pub doses: Vec<DoseDocument>,
}

/// One dose within a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseDocument {
    pub dose_number: u32,

    /// Age description such as "at 2 months" or "12-15 months"
    #[serde(default)]
    pub age: Option<String>,

    /// Explicit offset in days; takes precedence over `age`
    #[serde(default)]
    pub age_days: Option<i64>,

    /// Explicit end of the recommended range, used with `age_days`
    #[serde(default)]
    pub age_end_days: Option<i64>,

    #[serde(default)]
    pub annual: bool,

    /// Overrides the series-level `mandatory` flag
    #[serde(default)]
    pub mandatory: Option<bool>,

    #[serde(default)]
    pub gender: Option<Gender>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl CatalogDocument {
    /// Parses a catalog document from text
    pub fn parse(contents: &str, format: CatalogFormat) -> Result<Self> {
        match format {
            CatalogFormat::Json => Ok(serde_json::from_str(contents)?),
            CatalogFormat::Toml => toml::from_str(contents).map_err(|e| {
                ImmunizeError::Serialization(format!("Failed to parse catalog TOML: {e}"))
            }),
        }
    }

    /// Flattens the document into one definition per dose
    ///
    /// Definitions keep document order. Catalog-level rules are not checked
    /// here; see [`VaccineCatalog::validate`].
    pub fn into_definitions(self) -> std::result::Result<Vec<VaccineDefinition>, CatalogError> {
        let mut definitions = Vec::new();

        for mut series in self.vaccines {
            let doses = std::mem::take(&mut series.doses);
            for dose in doses {
                definitions.push(dose_to_definition(&series, dose)?);
            }
        }

        Ok(definitions)
    }

    /// Flattens and validates the document into a catalog
    pub fn into_catalog(self) -> Result<VaccineCatalog> {
        let version = self.version.clone();
        let definitions = self.into_definitions()?;
        let catalog = VaccineCatalog::new(definitions)?;
        Ok(match version {
            Some(version) => catalog.with_version(version),
            None => catalog,
        })
    }
}

fn dose_to_definition(
    series: &SeriesDocument,
    dose: DoseDocument,
) -> std::result::Result<VaccineDefinition, CatalogError> {
    let vaccine_id = VaccineId::new(series.id.as_str()).map_err(|_| CatalogError::EmptyField {
        field: "vaccine_id",
    })?;

    let mut builder = VaccineDefinition::builder()
        .vaccine_id(vaccine_id.as_str())
        .name(series.name.as_str())
        .disease(series.disease.as_str())
        .dose_number(dose.dose_number)
        .mandatory(dose.mandatory.unwrap_or(series.mandatory))
        .annual(dose.annual);

    if let Some(description) = dose.age {
        builder = builder.age_description(description);
    }

    if let Some(start_days) = dose.age_days {
        let age = match dose.age_end_days {
            Some(end_days) => RecommendedAge::between_days(start_days, end_days).ok_or(
                CatalogError::InvalidAgeRange {
                    vaccine_id,
                    dose_number: dose.dose_number,
                    start_days,
                    end_days,
                },
            )?,
            None => RecommendedAge::at_days(start_days),
        };
        builder = builder.age(age);
    }

    if let Some(gender) = dose.gender {
        builder = builder.gender(gender);
    }

    if let Some(notes) = dose.notes {
        builder = builder.notes(notes);
    }

    builder.build()
}

/// Loads, flattens and validates a catalog file
///
/// The format is chosen from the file extension (`.json` or `.toml`).
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// definitions violate a catalog invariant.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<VaccineCatalog> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ImmunizeError::Configuration(format!(
            "Catalog file not found: {}",
            path.display()
        )));
    }

    let format = CatalogFormat::from_path(path)?;
    let contents = fs::read_to_string(path).map_err(|e| {
        ImmunizeError::Io(format!(
            "Failed to read catalog file {}: {}",
            path.display(),
            e
        ))
    })?;

    let catalog = CatalogDocument::parse(&contents, format)?.into_catalog()?;

    tracing::info!(
        path = %path.display(),
        definitions = catalog.len(),
        version = catalog.version().unwrap_or("unversioned"),
        "Vaccine catalog loaded"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const JSON_CATALOG: &str = r#"{
        "version": "test",
        "vaccines": [
            {
                "id": "hepb",
                "name": "HepB",
                "disease": "Hepatitis B",
                "mandatory": true,
                "doses": [
                    { "dose_number": 1, "age": "at birth" },
                    { "dose_number": 2, "age_days": 30, "age_end_days": 60 },
                    { "dose_number": 3, "age": "6 months", "mandatory": false }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_json_document() {
        let doc = CatalogDocument::parse(JSON_CATALOG, CatalogFormat::Json).unwrap();
        assert_eq!(doc.version.as_deref(), Some("test"));

        let defs = doc.into_definitions().unwrap();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].recommended_age_days, 0);
        assert_eq!(defs[1].recommended_age_days, 30);
        assert_eq!(defs[1].recommended_age_end_days, Some(60));
        assert_eq!(defs[2].recommended_age_days, 184);
        assert!(defs[0].is_mandatory);
        assert!(!defs[2].is_mandatory);
    }

    #[test]
    fn test_parse_toml_document() {
        let toml_catalog = r#"
version = "toml-test"

[[vaccines]]
id = "flu"
name = "Influenza"
disease = "Influenza"
mandatory = true

[[vaccines.doses]]
dose_number = 1
age = "6 months"
annual = true
"#;
        let catalog = CatalogDocument::parse(toml_catalog, CatalogFormat::Toml)
            .unwrap()
            .into_catalog()
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.version(), Some("toml-test"));
        assert!(catalog.definitions()[0].is_annual);
    }

    #[test]
    fn test_reversed_explicit_range() {
        let doc = r#"{"vaccines": [{"id": "x", "name": "X", "doses": [
            {"dose_number": 1, "age_days": 90, "age_end_days": 30}
        ]}]}"#;
        let err = CatalogDocument::parse(doc, CatalogFormat::Json)
            .unwrap()
            .into_definitions()
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAgeRange { .. }));
    }

    #[test]
    fn test_into_catalog_validates() {
        let doc = r#"{"vaccines": [{"id": "x", "name": "X", "doses": [
            {"dose_number": 1, "age": "4 months"},
            {"dose_number": 2, "age": "2 months"}
        ]}]}"#;
        let err = CatalogDocument::parse(doc, CatalogFormat::Json)
            .unwrap()
            .into_catalog()
            .unwrap_err();
        assert!(matches!(
            err,
            ImmunizeError::InvalidCatalog(CatalogError::NonMonotonicDoses { .. })
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("a/catalog.JSON")).unwrap(),
            CatalogFormat::Json
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("catalog.toml")).unwrap(),
            CatalogFormat::Toml
        );
        assert!(CatalogFormat::from_path(Path::new("catalog.yaml")).is_err());
        assert!(CatalogFormat::from_path(Path::new("catalog")).is_err());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(JSON_CATALOG.as_bytes()).unwrap();
        file.flush().unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = load_catalog("does-not-exist.json");
        assert!(matches!(result, Err(ImmunizeError::Configuration(_))));
    }

    #[test]
    fn test_load_catalog_unknown_extension() {
        let file = NamedTempFile::new().unwrap();
        let result = load_catalog(file.path());
        assert!(result.is_err());
    }
}

//! Vaccine definition domain model
//!
//! A [`VaccineDefinition`] is one dose of one vaccine series as listed in the
//! catalog. Definitions are immutable once the catalog is loaded.

use super::age::RecommendedAge;
use super::errors::CatalogError;
use super::ids::VaccineId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender restriction on a dose, and the gender recorded for a child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!(
                "Invalid gender '{other}'. Must be one of: male, female"
            )),
        }
    }
}

/// One dose of a vaccine series
///
/// # Examples
///
/// ```
/// use immunize::domain::vaccine::VaccineDefinition;
///
/// let dose = VaccineDefinition::builder()
///     .vaccine_id("dtap")
///     .name("DTaP")
///     .disease("Diphtheria, tetanus, pertussis")
///     .dose_number(1)
///     .age_description("at 2 months")
///     .mandatory(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(dose.recommended_age_days, 62);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccineDefinition {
    /// Series identifier shared by all doses
    pub vaccine_id: VaccineId,

    /// Display name
    pub name: String,

    /// Disease(s) covered
    pub disease: String,

    /// Position in the series, starting at 1
    pub dose_number: u32,

    /// Offset from birth at which the dose is recommended
    pub recommended_age_days: i64,

    /// End of the recommended range, for range-based recommendations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_age_end_days: Option<i64>,

    /// Human-readable timing, e.g. "at 12-15 months"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_description: Option<String>,

    /// Whether the dose is part of the mandatory national schedule
    #[serde(default)]
    pub is_mandatory: bool,

    /// Whether the dose recurs every year
    #[serde(default)]
    pub is_annual: bool,

    /// Restricts the dose to one gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl VaccineDefinition {
    /// Returns a builder for constructing a VaccineDefinition
    pub fn builder() -> VaccineDefinitionBuilder {
        VaccineDefinitionBuilder::default()
    }

    /// Whether a child of the given gender should receive this dose
    ///
    /// Unknown child gender never excludes a dose.
    pub fn applies_to(&self, gender: Option<Gender>) -> bool {
        match (self.gender, gender) {
            (Some(required), Some(actual)) => required == actual,
            _ => true,
        }
    }
}

/// Builder for constructing VaccineDefinition instances
#[derive(Debug, Default)]
pub struct VaccineDefinitionBuilder {
    vaccine_id: Option<String>,
    name: Option<String>,
    disease: Option<String>,
    dose_number: Option<u32>,
    age: Option<RecommendedAge>,
    age_description: Option<String>,
    is_mandatory: bool,
    is_annual: bool,
    gender: Option<Gender>,
    notes: String,
}

impl VaccineDefinitionBuilder {
    /// Creates a new VaccineDefinitionBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vaccine series id
    pub fn vaccine_id(mut self, id: impl Into<String>) -> Self {
        self.vaccine_id = Some(id.into());
        self
    }

    /// Sets the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the disease covered
    pub fn disease(mut self, disease: impl Into<String>) -> Self {
        self.disease = Some(disease.into());
        self
    }

    /// Sets the dose number
    pub fn dose_number(mut self, dose_number: u32) -> Self {
        self.dose_number = Some(dose_number);
        self
    }

    /// Sets an exact recommended age in days
    pub fn age_days(mut self, days: i64) -> Self {
        self.age = Some(RecommendedAge::at_days(days));
        self
    }

    /// Sets a parsed recommended age (exact or range)
    pub fn age(mut self, age: RecommendedAge) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the recommended age from a description; parsed at build time
    pub fn age_description(mut self, description: impl Into<String>) -> Self {
        self.age_description = Some(description.into());
        self
    }

    /// Marks the dose as mandatory
    pub fn mandatory(mut self, is_mandatory: bool) -> Self {
        self.is_mandatory = is_mandatory;
        self
    }

    /// Marks the dose as recurring annually
    pub fn annual(mut self, is_annual: bool) -> Self {
        self.is_annual = is_annual;
        self
    }

    /// Restricts the dose to one gender
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Sets free-text notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Builds the VaccineDefinition
    ///
    /// An explicit age set with [`age_days`](Self::age_days) or
    /// [`age`](Self::age) takes precedence over the description, which is then
    /// kept for display only.
    ///
    /// # Errors
    ///
    /// Returns an error if the id, name or dose number is missing, or if no
    /// usable recommended age was provided. Catalog-level rules (negative
    /// offsets, dose ordering) are checked by the catalog, not here.
    pub fn build(self) -> Result<VaccineDefinition, CatalogError> {
        let vaccine_id = self
            .vaccine_id
            .and_then(|id| VaccineId::new(id).ok())
            .ok_or(CatalogError::EmptyField {
                field: "vaccine_id",
            })?;

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(CatalogError::EmptyField { field: "name" })?;

        let dose_number = self
            .dose_number
            .ok_or_else(|| CatalogError::InvalidDoseNumber {
                vaccine_id: vaccine_id.clone(),
                dose_number: 0,
            })?;

        let age = match (self.age, self.age_description.as_deref()) {
            (Some(age), _) => age,
            (None, Some(description)) => RecommendedAge::parse(description)?,
            (None, None) => {
                return Err(CatalogError::MissingAge {
                    vaccine_id,
                    dose_number,
                })
            }
        };

        Ok(VaccineDefinition {
            vaccine_id,
            name,
            disease: self.disease.unwrap_or_default(),
            dose_number,
            recommended_age_days: age.start_days(),
            recommended_age_end_days: age.end_days(),
            age_description: self.age_description,
            is_mandatory: self.is_mandatory,
            is_annual: self.is_annual,
            gender: self.gender,
            notes: self.notes,
        })
    }
}

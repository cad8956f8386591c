//! Catalog invariant checks
//!
//! Rules enforced for every definition set before it is used:
//! - names and ids are non-blank (ids are guaranteed by [`VaccineId`])
//! - dose numbers start at 1 and are unique within a series
//! - recommended ages are non-negative and ranges do not end before they start
//! - within a series, sorting doses by recommended age yields strictly
//!   increasing dose numbers
//!
//! [`VaccineId`]: crate::domain::VaccineId

use crate::domain::{CatalogError, VaccineDefinition, VaccineId};
use std::collections::{BTreeMap, HashSet};

/// Validates a set of vaccine definitions, returning the first violation found
///
/// Definitions are checked one by one first, then series by series in
/// vaccine-id order, so the reported error is deterministic for a given
/// input.
pub fn validate_definitions(definitions: &[VaccineDefinition]) -> Result<(), CatalogError> {
    for definition in definitions {
        validate_definition(definition)?;
    }

    let mut series: BTreeMap<&VaccineId, Vec<&VaccineDefinition>> = BTreeMap::new();
    for definition in definitions {
        series
            .entry(&definition.vaccine_id)
            .or_default()
            .push(definition);
    }

    for (vaccine_id, doses) in series {
        validate_series(vaccine_id, doses)?;
    }

    Ok(())
}

fn validate_definition(definition: &VaccineDefinition) -> Result<(), CatalogError> {
    if definition.name.trim().is_empty() {
        return Err(CatalogError::EmptyField { field: "name" });
    }

    if definition.dose_number < 1 {
        return Err(CatalogError::InvalidDoseNumber {
            vaccine_id: definition.vaccine_id.clone(),
            dose_number: definition.dose_number,
        });
    }

    if definition.recommended_age_days < 0 {
        return Err(CatalogError::NegativeAgeOffset {
            vaccine_id: definition.vaccine_id.clone(),
            dose_number: definition.dose_number,
            days: definition.recommended_age_days,
        });
    }

    if let Some(end_days) = definition.recommended_age_end_days {
        if end_days < definition.recommended_age_days {
            return Err(CatalogError::InvalidAgeRange {
                vaccine_id: definition.vaccine_id.clone(),
                dose_number: definition.dose_number,
                start_days: definition.recommended_age_days,
                end_days,
            });
        }
    }

    Ok(())
}

fn validate_series(
    vaccine_id: &VaccineId,
    mut doses: Vec<&VaccineDefinition>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for dose in &doses {
        if !seen.insert(dose.dose_number) {
            return Err(CatalogError::DuplicateDose {
                vaccine_id: vaccine_id.clone(),
                dose_number: dose.dose_number,
            });
        }
    }

    doses.sort_by_key(|d| (d.recommended_age_days, d.dose_number));

    for pair in doses.windows(2) {
        let (earlier, later) = (pair[0], pair[1]);
        if later.dose_number <= earlier.dose_number {
            return Err(CatalogError::NonMonotonicDoses {
                vaccine_id: vaccine_id.clone(),
                previous_dose: earlier.dose_number,
                previous_age_days: earlier.recommended_age_days,
                dose_number: later.dose_number,
                age_days: later.recommended_age_days,
            });
        }
    }

    Ok(())
}

//! Schedule generation
//!
//! Turns a birth date and a catalog into the ordered list of dose instances a
//! child should receive. Generation is a pure function of its inputs: the
//! same birth date, catalog and settings always produce the same entries.

use super::settings::{GenerationFilter, ScheduleSettings, DAYS_PER_OCCURRENCE};
use crate::core::catalog::VaccineCatalog;
use crate::domain::{ImmunizeError, Result, ScheduleEntry, VaccineDefinition};
use chrono::{Days, NaiveDate};

/// Generates the full schedule for a birth date
///
/// Every definition yields one entry, except annual definitions which yield
/// one entry per year while the occurrence's offset from birth stays within
/// `settings.horizon_days`. Entries are ordered by due date, then vaccine id,
/// then dose number, then occurrence year.
///
/// # Errors
///
/// - [`ImmunizeError::InvalidChild`] if `birth_date` is after `now`
/// - [`ImmunizeError::InvalidCatalog`] if the catalog violates an invariant
///
/// # Examples
///
/// ```
/// use immunize::core::catalog::VaccineCatalog;
/// use immunize::core::schedule::{generate_schedule, ScheduleSettings};
/// use immunize::domain::VaccineDefinition;
/// use chrono::NaiveDate;
///
/// let birth_dose = VaccineDefinition::builder()
///     .vaccine_id("hepb")
///     .name("HepB")
///     .dose_number(1)
///     .age_days(0)
///     .build()
///     .unwrap();
/// let catalog = VaccineCatalog::new(vec![birth_dose]).unwrap();
///
/// let birth = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let schedule = generate_schedule(birth, &catalog, birth, &ScheduleSettings::default()).unwrap();
///
/// assert_eq!(schedule.len(), 1);
/// assert_eq!(schedule[0].due_date, birth);
/// assert_eq!(schedule[0].notification_date, NaiveDate::from_ymd_opt(2023, 12, 16).unwrap());
/// ```
pub fn generate_schedule(
    birth_date: NaiveDate,
    catalog: &VaccineCatalog,
    now: NaiveDate,
    settings: &ScheduleSettings,
) -> Result<Vec<ScheduleEntry>> {
    generate_filtered(
        birth_date,
        catalog,
        now,
        settings,
        &GenerationFilter::default(),
    )
}

/// Generates a schedule restricted to the definitions a filter admits
pub fn generate_filtered(
    birth_date: NaiveDate,
    catalog: &VaccineCatalog,
    now: NaiveDate,
    settings: &ScheduleSettings,
    filter: &GenerationFilter,
) -> Result<Vec<ScheduleEntry>> {
    if birth_date > now {
        return Err(ImmunizeError::InvalidChild(format!(
            "birth date {birth_date} is after {now}"
        )));
    }

    catalog.validate()?;

    let mut schedule = Vec::with_capacity(catalog.len());
    for definition in catalog.definitions().iter().filter(|d| filter.admits(d)) {
        if definition.is_annual {
            push_annual_entries(&mut schedule, birth_date, definition, settings)?;
        } else {
            schedule.push(build_entry(birth_date, definition, None, settings)?);
        }
    }

    sort_schedule(&mut schedule);

    crate::log_schedule_generated!(birth_date, schedule.len());

    Ok(schedule)
}

/// Sorts entries into schedule order
pub fn sort_schedule(schedule: &mut [ScheduleEntry]) {
    schedule.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.vaccine_id.cmp(&b.vaccine_id))
            .then_with(|| a.dose_number.cmp(&b.dose_number))
            .then_with(|| a.occurrence_year.cmp(&b.occurrence_year))
    });
}

fn push_annual_entries(
    schedule: &mut Vec<ScheduleEntry>,
    birth_date: NaiveDate,
    definition: &VaccineDefinition,
    settings: &ScheduleSettings,
) -> Result<()> {
    let horizon = i64::from(settings.horizon_days);
    let mut year: u32 = 0;

    loop {
        let offset = year_shift(year)
            .and_then(|shift| definition.recommended_age_days.checked_add(shift))
            .ok_or_else(|| overflow(birth_date, definition))?;
        if offset > horizon {
            break;
        }
        schedule.push(build_entry(birth_date, definition, Some(year), settings)?);
        year += 1;
    }

    Ok(())
}

fn build_entry(
    birth_date: NaiveDate,
    definition: &VaccineDefinition,
    occurrence_year: Option<u32>,
    settings: &ScheduleSettings,
) -> Result<ScheduleEntry> {
    let shift = year_shift(occurrence_year.unwrap_or(0)).ok_or_else(|| overflow(birth_date, definition))?;

    let due_offset = definition
        .recommended_age_days
        .checked_add(shift)
        .ok_or_else(|| overflow(birth_date, definition))?;
    let due_date = offset_date(birth_date, due_offset)?;

    let due_window_end = match definition.recommended_age_end_days {
        Some(end_days) => {
            let end_offset = end_days
                .checked_add(shift)
                .ok_or_else(|| overflow(birth_date, definition))?;
            Some(offset_date(birth_date, end_offset)?)
        }
        None => None,
    };

    let notification_date =
        offset_date(due_date, -i64::from(settings.notification_lead_days))?;

    Ok(ScheduleEntry {
        id: ScheduleEntry::make_id(&definition.vaccine_id, definition.dose_number, occurrence_year),
        vaccine_id: definition.vaccine_id.clone(),
        vaccine_name: definition.name.clone(),
        disease: definition.disease.clone(),
        dose_number: definition.dose_number,
        occurrence_year,
        age_description: definition.age_description.clone(),
        is_mandatory: definition.is_mandatory,
        is_annual: definition.is_annual,
        due_date,
        due_window_end,
        notification_date,
        completed_date: None,
        notes: definition.notes.clone(),
    })
}

fn year_shift(year: u32) -> Option<i64> {
    i64::from(year).checked_mul(DAYS_PER_OCCURRENCE)
}

/// Shifts a date by a signed number of days
pub(crate) fn offset_date(base: NaiveDate, days: i64) -> Result<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        base.checked_add_days(step)
    } else {
        base.checked_sub_days(step)
    };
    shifted.ok_or_else(|| {
        ImmunizeError::Validation(format!(
            "date {base} shifted by {days} days is out of range"
        ))
    })
}

fn overflow(birth_date: NaiveDate, definition: &VaccineDefinition) -> ImmunizeError {
    ImmunizeError::Validation(format!(
        "{} dose {}: offset from {birth_date} overflows",
        definition.vaccine_id, definition.dose_number
    ))
}

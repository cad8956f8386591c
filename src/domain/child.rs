//! Child domain model
//!
//! Children are owned by the persistence collaborator; the engine only needs
//! the birth date and, for gender-specific doses, the gender.

use super::ids::ChildId;
use super::vaccine::Gender;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A child whose schedule is being computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Identifier in the external record store
    pub id: ChildId,

    /// Calendar birth date, no time component
    pub birth_date: NaiveDate,

    /// Gender, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl Child {
    /// Creates a new Child without a recorded gender
    pub fn new(id: ChildId, birth_date: NaiveDate) -> Self {
        Self {
            id,
            birth_date,
            gender: None,
        }
    }

    /// Sets the gender
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Age in whole days on the given date; negative if `on` precedes birth
    pub fn age_in_days(&self, on: NaiveDate) -> i64 {
        (on - self.birth_date).num_days()
    }
}

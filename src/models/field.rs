//! Field: a physical playing area games are scheduled onto.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a field.
pub type FieldId = Uuid;

/// A playing field. Inactive fields are skipped by the scheduler.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    /// Field number as printed on site; assignment prefers lower numbers.
    pub number: u32,
    pub active: bool,
}

impl Field {
    pub fn new(number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            active: true,
        }
    }
}

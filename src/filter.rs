/// Free-text and specialty filtering of appointment records.

use crate::models::AppointmentRecord;
use serde::{Deserialize, Serialize};

/// Specialty constraint; `All` disables it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Specialty(String),
}

impl Category {
    /// Parse a selector value; the sentinel `"all"` disables the constraint.
    pub fn from_string(value: &str) -> Self {
        match value {
            "all" => Category::All,
            specialty => Category::Specialty(specialty.to_string()),
        }
    }

    pub fn matches(&self, record: &AppointmentRecord) -> bool {
        match self {
            Category::All => true,
            Category::Specialty(specialty) => record.specialty == *specialty,
        }
    }
}

/// Case-insensitive substring match on patient or doctor name.
pub fn matches_query(record: &AppointmentRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.patient_name.to_lowercase().contains(&needle)
        || record.doctor_name.to_lowercase().contains(&needle)
}

/// Records matching both `query` and `category`, in input order.
pub fn filter<'a>(
    records: &'a [AppointmentRecord],
    query: &str,
    category: &Category,
) -> Vec<&'a AppointmentRecord> {
    records
        .iter()
        .filter(|r| category.matches(r) && matches_query(r, query))
        .collect()
}

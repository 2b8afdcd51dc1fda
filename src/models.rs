/// Data models for the synthetic appointment schedule.
///
/// This module defines the core data structures used throughout the crate:
/// - Status: Enum for the booking state of an appointment
/// - AppointmentRecord: One generated appointment
/// - StatusCounts: Per-status tallies shared by every aggregation bucket

use crate::error::{Result, ScheduleError};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Booking state of an appointment.
///
/// Drawn once at generation time and never updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Confirmed,
    Pending,
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Confirmed, Status::Pending, Status::Cancelled];

    /// Convert a string to a Status enum value.
    pub fn from_string(value: &str) -> Result<Self> {
        match value.to_lowercase().trim() {
            "confirmed" => Ok(Status::Confirmed),
            "pending" => Ok(Status::Pending),
            "cancelled" => Ok(Status::Cancelled),
            _ => Err(ScheduleError::UnknownStatus(value.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Status::Confirmed => "CONFIRMED",
            Status::Pending => "PENDING",
            Status::Cancelled => "CANCELLED",
        }
    }
}

/// A single generated appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: u64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub patient_name: String,
    pub doctor_name: String,
    pub specialty: String,
    pub status: Status,
    pub room: String,
    /// Set only by the doctor agenda, which tracks patient details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl AppointmentRecord {
    /// Calculate the duration of the appointment.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Get the duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Calendar day the appointment starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Check if this appointment overlaps with another on `[start, end)`.
    pub fn overlaps_with(&self, other: &AppointmentRecord) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Check if a timestamp falls within this appointment.
    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        &self.start <= at && at < &self.end
    }
}

/// Per-status counts for one aggregation bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    /// Tally a sequence of records.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a AppointmentRecord>) -> Self {
        let mut counts = StatusCounts::default();
        for record in records {
            counts.add(record.status);
        }
        counts
    }

    pub fn add(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Confirmed => self.confirmed += 1,
            Status::Pending => self.pending += 1,
            Status::Cancelled => self.cancelled += 1,
        }
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Confirmed => self.confirmed,
            Status::Pending => self.pending,
            Status::Cancelled => self.cancelled,
        }
    }

    /// Percentage of the bucket holding `status`.
    ///
    /// The denominator is `max(total, 1)`, so an empty bucket reports 0.
    pub fn share(&self, status: Status) -> f64 {
        (self.count(status) as f64 / self.total.max(1) as f64) * 100.0
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

//! Synthetic appointment schedules for medical dashboards.
//!
//! The crate fabricates a calendar of appointment records and derives the
//! read-only views the dashboards render from it:
//! - `generator`: seeded or entropy-driven schedule and week-agenda generation
//! - `filter`: free-text and specialty filtering
//! - `aggregate`: month, week and day buckets with per-status counts
//! - `navigator`: day/week/month/year date stepping and selection windows
//! - `calendar`: a session tying one dataset to the user's current selection
//! - `directory`: user, hospital and patient tables with their searches

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod generator;
pub mod models;
pub mod navigator;
pub mod portal;

pub use aggregate::{
    aggregate_by_day, aggregate_by_month, aggregate_by_week, summarize_day, DayBucket, DaySummary,
    MonthBucket,
};
pub use calendar::CalendarSession;
pub use config::{
    AgendaConfig, DailyCountRange, DateWindow, GeneratorConfig, RoomRange, SpecialtyAssignment,
    WorkingHours,
};
pub use directory::{
    filter_patients, filter_users, Directory, HospitalEntry, PatientEntry, RoleFilter,
    SecurityLogEntry, UserEntry,
};
pub use error::{Result, ScheduleError};
pub use filter::{filter, Category};
pub use generator::{generate, generate_week_agenda, generate_with, ScheduleDataset};
pub use models::{AppointmentRecord, Status, StatusCounts};
pub use navigator::{step, step_from, CalendarView, Direction, Granularity};

/// Generation parameters and their default fixtures.
///
/// Both configuration structs deserialize from JSON with every field
/// optional; missing fields fall back to the fixtures of the hospital
/// calendar and the doctor portal. A loaded configuration is always
/// validated before it is handed back.

use crate::directory::PatientEntry;
use crate::error::{Result, ScheduleError};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_SPECIALTIES: [(&str, &str); 6] = [
    ("Cardiologie", "Dr. Jean Martin"),
    ("Dermatologie", "Dr. Sophie Lambert"),
    ("Neurologie", "Dr. Marc Dubois"),
    ("Pédiatrie", "Dr. Anne Richard"),
    ("Orthopédie", "Dr. Paul Moreau"),
    ("Ophtalmologie", "Dr. Claire Bernard"),
];

const AGENDA_PATIENTS: [(&str, u32, &str); 7] = [
    ("Marie Dupont", 45, "Contrôle annuel"),
    ("Pierre Bernard", 62, "Suivi hypertension"),
    ("Claire Moreau", 38, "Consultation initiale"),
    ("Lucas Petit", 55, "ECG de contrôle"),
    ("Emma Leroy", 29, "Palpitations"),
    ("Hugo Martin", 71, "Suivi post-opératoire"),
    ("Léa Durand", 42, "Bilan cardiaque"),
];

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

const DEFAULT_PATIENTS: [&str; 8] = [
    "Marie Dupont",
    "Pierre Bernard",
    "Claire Moreau",
    "Lucas Petit",
    "Emma Leroy",
    "Hugo Martin",
    "Léa Durand",
    "Thomas Robert",
];

/// Closed interval of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let window = DateWindow { start, end };
        window.validate()?;
        Ok(window)
    }

    /// January 1st through December 31st of `year`.
    pub fn for_year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| ScheduleError::config(format!("Year {} is out of range", year)))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| ScheduleError::config(format!("Year {} is out of range", year)))?;
        Ok(DateWindow { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(ScheduleError::config(format!(
                "Date window end {} is before start {}",
                self.end, self.start
            )));
        }
        Ok(())
    }
}

/// Daily opening window, in whole hours.
///
/// `end_hour` is at most 23 so every appointment ends on the day it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WorkingHours {
    pub fn opening(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::default()) + Duration::hours(self.start_hour as i64)
    }

    pub fn closing(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::default()) + Duration::hours(self.end_hour as i64)
    }

    pub fn length_minutes(&self) -> i64 {
        (self.end_hour as i64 - self.start_hour as i64) * 60
    }

    fn validate(&self) -> Result<()> {
        if self.end_hour > 23 {
            return Err(ScheduleError::config(format!(
                "Working hours end {}:00 must be before midnight",
                self.end_hour
            )));
        }
        if self.end_hour <= self.start_hour {
            return Err(ScheduleError::config(format!(
                "Working hours end {}:00 must be after start {}:00",
                self.end_hour, self.start_hour
            )));
        }
        Ok(())
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        WorkingHours {
            start_hour: 8,
            end_hour: 18,
        }
    }
}

/// Inclusive range of appointments emitted per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCountRange {
    pub min: i32,
    pub max: i32,
}

impl DailyCountRange {
    fn validate(&self) -> Result<()> {
        if self.min < 0 {
            return Err(ScheduleError::config(format!(
                "Daily count lower bound {} cannot be negative",
                self.min
            )));
        }
        if self.max < self.min {
            return Err(ScheduleError::config(format!(
                "Daily count upper bound {} is below lower bound {}",
                self.max, self.min
            )));
        }
        Ok(())
    }
}

/// Room numbers `first..first + count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRange {
    pub first: u32,
    pub count: u32,
}

impl RoomRange {
    fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(ScheduleError::config("Room range cannot be empty"));
        }
        Ok(())
    }
}

/// The doctor assigned to a specialty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyAssignment {
    pub specialty: String,
    pub doctor: String,
}

/// Parameters for a full calendar schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub window: DateWindow,
    pub roster: Vec<SpecialtyAssignment>,
    pub patients: Vec<String>,
    pub daily_count: DailyCountRange,
    pub slot_lengths_minutes: Vec<u32>,
    pub start_grid_minutes: u32,
    pub working_hours: WorkingHours,
    pub rooms: RoomRange,
    pub room_prefix: String,
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Default fixtures spanning one calendar year.
    pub fn for_year(year: i32) -> Result<Self> {
        Ok(GeneratorConfig {
            window: DateWindow::for_year(year)?,
            ..GeneratorConfig::default()
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GeneratorConfig = parse_json(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let config: GeneratorConfig = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn specialties(&self) -> impl Iterator<Item = &str> {
        self.roster.iter().map(|a| a.specialty.as_str())
    }

    /// Doctor mapped to `specialty`, if the specialty is on the roster.
    pub fn doctor_for(&self, specialty: &str) -> Option<&str> {
        self.roster
            .iter()
            .find(|a| a.specialty == specialty)
            .map(|a| a.doctor.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;

        if self.roster.is_empty() {
            return Err(ScheduleError::config("Specialty roster cannot be empty"));
        }
        let mut seen = HashSet::new();
        for assignment in &self.roster {
            require_label("Specialty", &assignment.specialty)?;
            require_label("Doctor", &assignment.doctor)?;
            if !seen.insert(assignment.specialty.as_str()) {
                return Err(ScheduleError::config(format!(
                    "Specialty '{}' is assigned more than once",
                    assignment.specialty
                )));
            }
        }

        if self.patients.is_empty() {
            return Err(ScheduleError::config("Patient pool cannot be empty"));
        }
        for patient in &self.patients {
            require_label("Patient", patient)?;
        }

        self.daily_count.validate()?;
        self.working_hours.validate()?;
        self.rooms.validate()?;

        if self.start_grid_minutes == 0 {
            return Err(ScheduleError::config("Start grid must be positive"));
        }
        if self.slot_lengths_minutes.is_empty() {
            return Err(ScheduleError::config("Slot lengths cannot be empty"));
        }
        let open_minutes = self.working_hours.length_minutes();
        for &length in &self.slot_lengths_minutes {
            if length == 0 {
                return Err(ScheduleError::config("Slot length must be positive"));
            }
            if length as i64 > open_minutes {
                return Err(ScheduleError::config(format!(
                    "Slot length of {} minutes does not fit in working hours",
                    length
                )));
            }
        }

        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let year = Local::now().year();
        let window = DateWindow::for_year(year).unwrap_or(DateWindow {
            start: NaiveDate::MIN,
            end: NaiveDate::MIN,
        });

        GeneratorConfig {
            window,
            roster: DEFAULT_SPECIALTIES
                .iter()
                .map(|(specialty, doctor)| SpecialtyAssignment {
                    specialty: specialty.to_string(),
                    doctor: doctor.to_string(),
                })
                .collect(),
            patients: DEFAULT_PATIENTS.iter().map(|p| p.to_string()).collect(),
            daily_count: DailyCountRange { min: 2, max: 9 },
            slot_lengths_minutes: vec![30, 60, 90],
            start_grid_minutes: 30,
            working_hours: WorkingHours::default(),
            rooms: RoomRange {
                first: 100,
                count: 300,
            },
            room_prefix: "Salle".to_string(),
            seed: None,
        }
    }
}

/// Parameters for one doctor's week agenda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    pub doctor: String,
    pub specialty: String,
    pub patients: Vec<PatientEntry>,
    pub daily_count: DailyCountRange,
    pub start_times: Vec<NaiveTime>,
    pub slot_length_minutes: u32,
    pub rooms: RoomRange,
    pub room_prefix: String,
    pub skip_weekends: bool,
    pub seed: Option<u64>,
}

impl AgendaConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AgendaConfig = parse_json(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        require_label("Doctor", &self.doctor)?;
        require_label("Specialty", &self.specialty)?;

        if self.patients.is_empty() {
            return Err(ScheduleError::config("Patient pool cannot be empty"));
        }
        for patient in &self.patients {
            require_label("Patient", &patient.name)?;
        }

        self.daily_count.validate()?;
        self.rooms.validate()?;

        if self.slot_length_minutes == 0 {
            return Err(ScheduleError::config("Slot length must be positive"));
        }
        if self.start_times.is_empty() {
            return Err(ScheduleError::config("Agenda start times cannot be empty"));
        }
        let unique: HashSet<_> = self.start_times.iter().collect();
        if unique.len() != self.start_times.len() {
            return Err(ScheduleError::config("Agenda start times must be distinct"));
        }
        let slot_seconds = self.slot_length_minutes.saturating_mul(60);
        for time in &self.start_times {
            if time.num_seconds_from_midnight().saturating_add(slot_seconds) >= SECONDS_PER_DAY {
                return Err(ScheduleError::config(format!(
                    "A {} minute slot starting at {} runs past midnight",
                    self.slot_length_minutes,
                    time.format("%H:%M")
                )));
            }
        }

        Ok(())
    }
}

impl Default for AgendaConfig {
    fn default() -> Self {
        // Morning block 08:00-11:30, afternoon block 14:00-17:00.
        let start_times = (8..12)
            .chain(14..18)
            .flat_map(|hour| [(hour, 0), (hour, 30)])
            .filter(|&(hour, minute)| !(hour == 17 && minute == 30))
            .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
            .collect();

        AgendaConfig {
            doctor: DEFAULT_SPECIALTIES[0].1.to_string(),
            specialty: DEFAULT_SPECIALTIES[0].0.to_string(),
            patients: AGENDA_PATIENTS
                .iter()
                .map(|&(name, age, condition)| PatientEntry::new(name, age, condition))
                .collect(),
            daily_count: DailyCountRange { min: 4, max: 9 },
            start_times,
            slot_length_minutes: 30,
            rooms: RoomRange {
                first: 100,
                count: 10,
            },
            room_prefix: "Salle".to_string(),
            skip_weekends: true,
            seed: None,
        }
    }
}

fn require_label(kind: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScheduleError::config(format!("{} label cannot be empty", kind)));
    }
    Ok(())
}

fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    log::info!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_json(&contents)
}

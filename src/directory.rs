/// Directory data shown by the admin and doctor dashboards.
///
/// This module defines the directory entries and their searches:
/// - UserEntry: Accounts listed in the admin user table
/// - HospitalEntry: Facilities listed in the admin hospital table
/// - SecurityLogEntry: Recent security events
/// - PatientEntry: Patients followed by a doctor
///
/// A `Directory` is built once and handed to whoever renders it; nothing
/// here reads shared global state.

use crate::error::Result;
use crate::portal::Role;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityStatus {
    Active,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutcome {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub last_login: NaiveDateTime,
    pub hospital: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalEntry {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub doctors: u32,
    pub patients: u32,
    pub status: FacilityStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityLogEntry {
    pub id: u64,
    pub action: String,
    pub user: String,
    pub ip: IpAddr,
    pub time: NaiveDateTime,
    pub outcome: LogOutcome,
}

/// A patient as known to the doctor portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientEntry {
    pub name: String,
    pub age: u32,
    pub condition: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub last_visit: Option<NaiveDate>,
    #[serde(default)]
    pub next_appointment: Option<NaiveDate>,
}

impl PatientEntry {
    pub fn new(name: &str, age: u32, condition: &str) -> Self {
        PatientEntry {
            name: name.to_string(),
            age,
            condition: condition.to_string(),
            phone: None,
            last_visit: None,
            next_appointment: None,
        }
    }
}

/// Role constraint for the user table; `All` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    /// Parse a selector value; the sentinel `"all"` disables the constraint.
    pub fn from_string(value: &str) -> Result<Self> {
        match value {
            "all" => Ok(RoleFilter::All),
            role => Role::from_string(role).map(RoleFilter::Only),
        }
    }

    pub fn matches(&self, user: &UserEntry) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(role) => user.role == *role,
        }
    }
}

/// Users whose name or email contains `query` (case-insensitive) and whose
/// role passes `role`, in input order.
pub fn filter_users<'a>(users: &'a [UserEntry], query: &str, role: &RoleFilter) -> Vec<&'a UserEntry> {
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|u| role.matches(u))
        .filter(|u| {
            u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Patients whose name contains `query` (case-insensitive), in input order.
pub fn filter_patients<'a>(patients: &'a [PatientEntry], query: &str) -> Vec<&'a PatientEntry> {
    let needle = query.to_lowercase();
    patients
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// All directory tables for one dashboard instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub users: Vec<UserEntry>,
    pub hospitals: Vec<HospitalEntry>,
    pub security_log: Vec<SecurityLogEntry>,
    pub patients: Vec<PatientEntry>,
}

impl Directory {
    /// Demo tables of the admin and doctor dashboards.
    pub fn fixtures() -> Self {
        Directory {
            users: fixture_users(),
            hospitals: fixture_hospitals(),
            security_log: fixture_security_log(),
            patients: fixture_patients(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn active_users(&self) -> usize {
        self.users
            .iter()
            .filter(|u| u.status == AccountStatus::Active)
            .count()
    }

    pub fn failed_logins(&self) -> Vec<&SecurityLogEntry> {
        self.security_log
            .iter()
            .filter(|e| e.outcome == LogOutcome::Failed)
            .collect()
    }

    pub fn user_by_email(&self, email: &str) -> Option<&UserEntry> {
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
    }
}

fn stamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap_or_default()
}

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn user(
    id: u64,
    name: &str,
    email: &str,
    role: Role,
    status: AccountStatus,
    last_login: NaiveDateTime,
    hospital: &str,
) -> UserEntry {
    UserEntry {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        last_login,
        hospital: hospital.to_string(),
    }
}

fn fixture_users() -> Vec<UserEntry> {
    use AccountStatus::*;
    vec![
        user(1, "Dr. Jean Martin", "jean.martin@hospital.fr", Role::Doctor, Active, stamp(2025, 1, 7, 9, 30), "CHU Central"),
        user(2, "Marie Dupont", "marie.dupont@hospital.fr", Role::Hospital, Active, stamp(2025, 1, 7, 8, 15), "CHU Central"),
        user(3, "Pierre Bernard", "pierre.bernard@email.com", Role::Patient, Active, stamp(2025, 1, 6, 14, 20), "-"),
        user(4, "Dr. Sophie Lambert", "sophie.lambert@hospital.fr", Role::Doctor, Inactive, stamp(2024, 12, 20, 11, 0), "Clinique Nord"),
        user(5, "Admin Principal", "admin@mediplan.fr", Role::Admin, Active, stamp(2025, 1, 7, 10, 0), "Tous"),
    ]
}

fn fixture_hospitals() -> Vec<HospitalEntry> {
    let hospital = |id, name: &str, city: &str, doctors, patients, status| HospitalEntry {
        id,
        name: name.to_string(),
        city: city.to_string(),
        doctors,
        patients,
        status,
    };
    vec![
        hospital(1, "CHU Central", "Paris", 45, 2500, FacilityStatus::Active),
        hospital(2, "Clinique Nord", "Lyon", 28, 1200, FacilityStatus::Active),
        hospital(3, "Hôpital Saint-Louis", "Marseille", 32, 1800, FacilityStatus::Maintenance),
    ]
}

fn fixture_security_log() -> Vec<SecurityLogEntry> {
    let entry = |id, action: &str, user: &str, ip: [u8; 4], time, outcome| SecurityLogEntry {
        id,
        action: action.to_string(),
        user: user.to_string(),
        ip: IpAddr::V4(Ipv4Addr::from(ip)),
        time,
        outcome,
    };
    vec![
        entry(1, "Connexion", "admin@mediplan.fr", [192, 168, 1, 100], stamp(2025, 1, 7, 10, 0), LogOutcome::Success),
        entry(2, "Modification utilisateur", "admin@mediplan.fr", [192, 168, 1, 100], stamp(2025, 1, 7, 9, 45), LogOutcome::Success),
        entry(3, "Tentative de connexion", "inconnu@test.com", [45, 23, 67, 89], stamp(2025, 1, 7, 3, 22), LogOutcome::Failed),
        entry(4, "Export données", "marie.dupont@hospital.fr", [192, 168, 1, 105], stamp(2025, 1, 6, 16, 30), LogOutcome::Success),
    ]
}

fn fixture_patients() -> Vec<PatientEntry> {
    let patient = |name: &str, age, condition: &str, phone: &str, last_visit, next| PatientEntry {
        phone: Some(phone.to_string()),
        last_visit,
        next_appointment: next,
        ..PatientEntry::new(name, age, condition)
    };
    vec![
        patient("Marie Dupont", 45, "Hypertension", "+33 6 12 34 56 78", day(2025, 1, 5), day(2025, 1, 15)),
        patient("Pierre Bernard", 62, "Arythmie cardiaque", "+33 6 98 76 54 32", day(2025, 1, 3), day(2025, 1, 20)),
        patient("Claire Moreau", 38, "Suivi préventif", "+33 6 45 67 89 01", day(2024, 12, 28), day(2025, 2, 1)),
        patient("Lucas Petit", 55, "Post-opératoire", "+33 6 23 45 67 89", day(2025, 1, 6), None),
    ]
}

/// Per-role navigation menus for the dashboards.

use crate::error::{Result, ScheduleError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Hospital,
    Doctor,
    Patient,
}

impl Role {
    pub fn from_string(value: &str) -> Result<Self> {
        match value.to_lowercase().trim() {
            "admin" => Ok(Role::Admin),
            "hospital" => Ok(Role::Hospital),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            _ => Err(ScheduleError::UnknownRole(value.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Hospital => "hospital",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub href: &'static str,
}

const fn item(label: &'static str, href: &'static str) -> MenuItem {
    MenuItem { label, href }
}

const BASE_ITEMS: [MenuItem; 3] = [
    item("Tableau de bord", "/"),
    item("Rendez-vous", "/appointments"),
    item("Notifications", "/notifications"),
];

const ADMIN_ITEMS: [MenuItem; 4] = [
    item("Utilisateurs", "/users"),
    item("Hôpitaux", "/hospitals"),
    item("Statistiques", "/stats"),
    item("Paramètres", "/settings"),
];

const HOSPITAL_ITEMS: [MenuItem; 4] = [
    item("Médecins", "/doctors"),
    item("Patients", "/patients"),
    item("Statistiques", "/stats"),
    item("Paramètres", "/settings"),
];

const DOCTOR_ITEMS: [MenuItem; 2] = [
    item("Mes patients", "/patients"),
    item("Mon profil", "/profile"),
];

const PATIENT_ITEMS: [MenuItem; 2] = [
    item("Mes médecins", "/doctors"),
    item("Mon profil", "/profile"),
];

/// Sidebar entries for `role`: the shared base items, then the role's own.
pub fn menu_items(role: Role) -> Vec<MenuItem> {
    let extra: &[MenuItem] = match role {
        Role::Admin => &ADMIN_ITEMS,
        Role::Hospital => &HOSPITAL_ITEMS,
        Role::Doctor => &DOCTOR_ITEMS,
        Role::Patient => &PATIENT_ITEMS,
    };
    BASE_ITEMS.iter().chain(extra).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_starts_with_base_items() {
        for role in [Role::Admin, Role::Hospital, Role::Doctor, Role::Patient] {
            let items = menu_items(role);
            assert_eq!(&items[..3], &BASE_ITEMS[..]);
        }
    }

    #[test]
    fn role_specific_lengths() {
        assert_eq!(menu_items(Role::Admin).len(), 7);
        assert_eq!(menu_items(Role::Doctor).len(), 5);
        assert_eq!(menu_items(Role::Patient)[3].href, "/doctors");
    }

    #[test]
    fn parses_roles() {
        assert_eq!(Role::from_string("Doctor").unwrap(), Role::Doctor);
        assert!(Role::from_string("nurse").is_err());
        assert_eq!(Role::from_string(Role::Patient.name()).unwrap(), Role::Patient);
    }
}

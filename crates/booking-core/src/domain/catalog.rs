//! Service and employee records consumed by availability calculations.
//!
//! Both shapes come from the REST API with many optional fields.  They are
//! plain structs: every optional field is an `Option` and is omitted from JSON
//! when absent.  Names are bilingual (`nameEn` / `nameAr`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::weekday::Weekday;

/// Duration used when a service record does not specify one.
pub const DEFAULT_SERVICE_MINUTES: u16 = 60;

/// A bookable service (e.g. "Haircut", "Laser session").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    pub id: Uuid,
    pub name_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl ServiceData {
    pub fn new(name_en: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name_en: name_en.into(),
            name_ar: None,
            duration_minutes: None,
            price: None,
            category: None,
            description: None,
            active: true,
        }
    }

    /// Appointment length, falling back to [`DEFAULT_SERVICE_MINUTES`].
    pub fn duration(&self) -> u16 {
        self.duration_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_SERVICE_MINUTES)
    }
}

/// A staff member who performs services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeData {
    pub id: Uuid,
    pub name_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Days this employee works.  `None` means every day the business is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_days: Option<Vec<Weekday>>,
    /// Services this employee can perform.  Empty means all services.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_ids: Vec<Uuid>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl EmployeeData {
    pub fn new(name_en: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name_en: name_en.into(),
            name_ar: None,
            phone: None,
            email: None,
            position: None,
            working_days: None,
            service_ids: Vec::new(),
            active: true,
        }
    }

    /// Whether the employee is scheduled on `day` (ignores business hours).
    pub fn works_on(&self, day: Weekday) -> bool {
        self.active
            && self
                .working_days
                .as_ref()
                .map_or(true, |days| days.contains(&day))
    }

    pub fn can_perform(&self, service: &ServiceData) -> bool {
        self.service_ids.is_empty() || self.service_ids.contains(&service.id)
    }
}

fn default_true() -> bool {
    true
}

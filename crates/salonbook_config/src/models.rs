// --- File: crates/salonbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Business Config ---
// The salon itself: identity, IANA time zone, and the slot grid step.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BusinessConfig {
    pub id: Uuid,
    pub name: String,
    /// IANA zone name, e.g. "Europe/Zurich". Validated at startup.
    pub time_zone: String,
    #[serde(default = "default_scheduling_interval")]
    pub scheduling_interval_minutes: i64,
}

fn default_scheduling_interval() -> i64 {
    30
}

// --- Booking Policy Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PolicyConfig {
    #[serde(default = "default_min_notice_hours")]
    pub min_notice_hours: i64,
    #[serde(default = "default_max_advance_days")]
    pub max_advance_days: i64,
    #[serde(default = "default_true")]
    pub allow_reschedule: bool,
    #[serde(default = "default_limit_hours")]
    pub reschedule_limit_hours: i64,
    #[serde(default = "default_true")]
    pub allow_cancellation: bool,
    #[serde(default = "default_limit_hours")]
    pub cancellation_limit_hours: i64,
    #[serde(default)]
    pub require_confirmation: bool,
    #[serde(default = "default_confirmation_deadline_hours")]
    pub confirmation_deadline_hours: i64,
}

fn default_min_notice_hours() -> i64 {
    24
}
fn default_max_advance_days() -> i64 {
    60
}
fn default_limit_hours() -> i64 {
    24
}
fn default_confirmation_deadline_hours() -> i64 {
    48
}
fn default_true() -> bool {
    true
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            min_notice_hours: default_min_notice_hours(),
            max_advance_days: default_max_advance_days(),
            allow_reschedule: true,
            reschedule_limit_hours: default_limit_hours(),
            allow_cancellation: true,
            cancellation_limit_hours: default_limit_hours(),
            require_confirmation: false,
            confirmation_deadline_hours: default_confirmation_deadline_hours(),
        }
    }
}

// --- Working Hours Config ---
// One weekday entry for a professional. Times are local wall-clock "HH:MM".
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkingHoursConfig {
    /// Short weekday name: "Mon", "Tue", ...
    pub day: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub break_start: Option<String>,
    #[serde(default)]
    pub break_end: Option<String>,
}

// --- Professional Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProfessionalConfig {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub working_hours: Vec<WorkingHoursConfig>,
}

// --- Service Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: i64,
    /// Price in the smallest currency unit (e.g., cents).
    pub price: i64,
    /// Professionals allowed to perform this service.
    #[serde(default)]
    pub professionals: Vec<Uuid>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,
    pub business: BusinessConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub professionals: Vec<ProfessionalConfig>,
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

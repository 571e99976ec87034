// --- File: crates/salonbook_booking/src/catalog.rs ---
//! Validated view of the configured business catalog.
//!
//! Raw configuration ([`salonbook_config::AppConfig`]) is strings and loose
//! references. [`Catalog::from_config`] converts it into domain types exactly
//! once, at startup, and fails fast on anything malformed: an unknown time
//! zone, an unparseable "HH:MM", a break outside working hours, a service
//! pointing at a professional that does not exist. Handlers only ever see the
//! validated form.

use chrono::{Duration, NaiveTime, Weekday};
use chrono_tz::Tz;
use salonbook_common::error::{config_error, SalonbookError};
use salonbook_config::{AppConfig, ProfessionalConfig, ServiceConfig, WorkingHoursConfig};
use salonbook_scheduling::models::{
    BookingPolicy, ServiceDefinition, WorkingHours, WorkingSchedule,
};
use salonbook_scheduling::time::resolve_time_zone;
use std::collections::{HashMap, HashSet};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
}

/// The immutable, validated catalog handlers work against.
pub struct Catalog {
    pub business_id: Uuid,
    pub business_name: String,
    pub time_zone: Tz,
    pub interval: Duration,
    pub policy: BookingPolicy,
    services: HashMap<Uuid, ServiceDefinition>,
    schedules: HashMap<Uuid, WorkingSchedule>,
    professionals: HashMap<Uuid, Professional>,
}

impl Catalog {
    pub fn from_config(config: &AppConfig) -> Result<Self, SalonbookError> {
        let time_zone = resolve_time_zone(&config.business.time_zone)
            .map_err(|e| config_error(format!("business.time_zone: {e}")))?;

        let interval_minutes = config.business.scheduling_interval_minutes;
        if interval_minutes <= 0 {
            return Err(config_error(format!(
                "business.scheduling_interval_minutes must be positive, got {interval_minutes}"
            )));
        }

        let policy = build_policy(config)?;

        let mut professionals = HashMap::new();
        let mut schedules = HashMap::new();
        for entry in &config.professionals {
            let schedule = build_schedule(entry)?;
            if professionals
                .insert(
                    entry.id,
                    Professional {
                        id: entry.id,
                        name: entry.name.clone(),
                    },
                )
                .is_some()
            {
                return Err(config_error(format!(
                    "duplicate professional id {}",
                    entry.id
                )));
            }
            schedules.insert(entry.id, schedule);
        }

        let mut services = HashMap::new();
        for entry in &config.services {
            let service = build_service(entry, &professionals)?;
            if services.insert(entry.id, service).is_some() {
                return Err(config_error(format!("duplicate service id {}", entry.id)));
            }
        }

        info!(
            business = %config.business.name,
            time_zone = %time_zone,
            professionals = professionals.len(),
            services = services.len(),
            "catalog loaded"
        );

        Ok(Catalog {
            business_id: config.business.id,
            business_name: config.business.name.clone(),
            time_zone,
            interval: Duration::minutes(interval_minutes),
            policy,
            services,
            schedules,
            professionals,
        })
    }

    pub fn service(&self, id: Uuid) -> Option<&ServiceDefinition> {
        self.services.get(&id)
    }

    pub fn schedule(&self, id: Uuid) -> Option<&WorkingSchedule> {
        self.schedules.get(&id)
    }

    pub fn professional(&self, id: Uuid) -> Option<&Professional> {
        self.professionals.get(&id)
    }
}

fn build_policy(config: &AppConfig) -> Result<BookingPolicy, SalonbookError> {
    let p = &config.policy;
    for (name, value) in [
        ("min_notice_hours", p.min_notice_hours),
        ("max_advance_days", p.max_advance_days),
        ("reschedule_limit_hours", p.reschedule_limit_hours),
        ("cancellation_limit_hours", p.cancellation_limit_hours),
        ("confirmation_deadline_hours", p.confirmation_deadline_hours),
    ] {
        if value < 0 {
            return Err(config_error(format!(
                "policy.{name} must not be negative, got {value}"
            )));
        }
    }
    Ok(BookingPolicy {
        min_notice_hours: p.min_notice_hours,
        max_advance_days: p.max_advance_days,
        allow_reschedule: p.allow_reschedule,
        reschedule_limit_hours: p.reschedule_limit_hours,
        allow_cancellation: p.allow_cancellation,
        cancellation_limit_hours: p.cancellation_limit_hours,
        require_confirmation: p.require_confirmation,
        confirmation_deadline_hours: p.confirmation_deadline_hours,
    })
}

fn build_schedule(entry: &ProfessionalConfig) -> Result<WorkingSchedule, SalonbookError> {
    let mut hours = HashMap::new();
    for raw in &entry.working_hours {
        let (day, parsed) = build_working_hours(&entry.name, raw)?;
        if hours.insert(day, parsed).is_some() {
            return Err(config_error(format!(
                "professional {} has two entries for {}",
                entry.name, raw.day
            )));
        }
    }
    Ok(WorkingSchedule::new(entry.id, hours))
}

fn build_working_hours(
    professional: &str,
    raw: &WorkingHoursConfig,
) -> Result<(Weekday, WorkingHours), SalonbookError> {
    let day = parse_weekday(&raw.day).ok_or_else(|| {
        config_error(format!(
            "professional {professional}: unknown weekday {:?}",
            raw.day
        ))
    })?;
    let start = parse_time(professional, "start", &raw.start)?;
    let end = parse_time(professional, "end", &raw.end)?;
    let break_start = raw
        .break_start
        .as_deref()
        .map(|t| parse_time(professional, "break_start", t))
        .transpose()?;
    let break_end = raw
        .break_end
        .as_deref()
        .map(|t| parse_time(professional, "break_end", t))
        .transpose()?;
    let hours = WorkingHours::new(start, end, break_start, break_end)
        .map_err(|e| config_error(format!("professional {professional}, {}: {e}", raw.day)))?;
    Ok((day, hours))
}

fn build_service(
    entry: &ServiceConfig,
    professionals: &HashMap<Uuid, Professional>,
) -> Result<ServiceDefinition, SalonbookError> {
    let mut eligible = HashSet::new();
    for id in &entry.professionals {
        if !professionals.contains_key(id) {
            return Err(config_error(format!(
                "service {} references unknown professional {id}",
                entry.name
            )));
        }
        eligible.insert(*id);
    }
    ServiceDefinition::new(
        entry.id,
        entry.name.clone(),
        entry.duration_minutes,
        entry.price,
        eligible,
    )
    .map_err(|e| config_error(format!("service {}: {e}", entry.name)))
}

fn parse_time(professional: &str, field: &str, value: &str) -> Result<NaiveTime, SalonbookError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        config_error(format!(
            "professional {professional}: {field} {value:?} is not HH:MM"
        ))
    })
}

fn parse_weekday(day: &str) -> Option<Weekday> {
    match day {
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        "Sun" => Some(Weekday::Sun),
        _ => None,
    }
}

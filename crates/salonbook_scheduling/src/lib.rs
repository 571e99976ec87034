// --- File: crates/salonbook_scheduling/src/lib.rs ---
// Declare modules within this crate
pub mod availability;
#[cfg(test)]
mod availability_proptest;
pub mod conflict;
#[cfg(test)]
mod conflict_test;
pub mod error;
pub mod lifecycle;
#[cfg(test)]
mod lifecycle_test;
pub mod models;
pub mod policy;
pub mod time;

pub use error::SchedulingError;
pub use models::{
    Appointment, AppointmentStatus, BookingPolicy, ServiceDefinition, TimeWindow, WorkingHours,
    WorkingSchedule,
};

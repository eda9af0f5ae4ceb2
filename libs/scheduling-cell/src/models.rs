use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Fixed grid granularity. Every slot starts on a 30-minute boundary
/// counted from the window's start time.
pub const SLOT_MINUTES: i64 = 30;

/// The only appointment status that occupies a slot.
pub const STATUS_SCHEDULED: &str = "scheduled";

/// A doctor's working hours for one weekday. `day_of_week` holds the full
/// weekday name ("Monday" .. "Sunday"). At most one window per doctor per
/// weekday is considered; the first row returned wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub doctor_id: i64,
    pub day_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub time_slot: NaiveTime,
    pub status: String,
}

/// One offered slot in the edit view. `formatted_time` is the 12-hour
/// rendering shown to the operator; `is_current` marks the slot the edited
/// appointment already occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDescriptor {
    pub time: NaiveTime,
    pub formatted_time: String,
    pub is_current: bool,
}

impl SlotDescriptor {
    pub fn new(time: NaiveTime, is_current: bool) -> Self {
        Self {
            time,
            formatted_time: time.format("%I:%M %p").to_string(),
            is_current,
        }
    }
}

// Error types specific to scheduling operations
#[derive(Debug, Clone)]
pub enum SchedulingError {
    InvalidParameters(String),
    DataAccess(String),
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::InvalidParameters(msg) => write!(f, "Invalid parameters: {}", msg),
            SchedulingError::DataAccess(msg) => write!(f, "Data access error: {}", msg),
        }
    }
}

impl std::error::Error for SchedulingError {}

impl From<anyhow::Error> for SchedulingError {
    fn from(err: anyhow::Error) -> Self {
        SchedulingError::DataAccess(err.to_string())
    }
}

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{AvailabilityWindow, SchedulingError, SlotDescriptor, SLOT_MINUTES};
use crate::services::{AppointmentStore, AvailabilityStore};

/// Computes the slots offered when an existing appointment is being moved.
pub struct SlotService {
    appointments: AppointmentStore,
    availability: AvailabilityStore,
}

impl SlotService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appointments: AppointmentStore::new(config),
            availability: AvailabilityStore::new(config),
        }
    }

    /// Available slots for `doctor_id` on `date` while editing
    /// `appointment_id`. An empty result means the doctor has no window
    /// configured for that weekday; it is not an error.
    pub async fn edit_slots(
        &self,
        doctor_id: i64,
        date: &str,
        appointment_id: i64,
        auth_token: &str,
    ) -> Result<Vec<SlotDescriptor>, SchedulingError> {
        if doctor_id <= 0 {
            return Err(SchedulingError::InvalidParameters(
                "Doctor id must be a positive integer".to_string(),
            ));
        }
        if appointment_id <= 0 {
            return Err(SchedulingError::InvalidParameters(
                "Appointment id must be a positive integer".to_string(),
            ));
        }
        if date.trim().is_empty() {
            return Err(SchedulingError::InvalidParameters(
                "Date must not be empty".to_string(),
            ));
        }
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            SchedulingError::InvalidParameters(format!("Date '{}' is not a valid date", date))
        })?;

        debug!(
            "Calculating edit slots for doctor {} on {} (appointment {})",
            doctor_id, date, appointment_id
        );

        // A missing appointment row means no slot is auto-included.
        let current_slot = self.appointments.time_slot(appointment_id, auth_token).await?;

        let day_of_week = weekday_name(date);
        let window = match self
            .availability
            .window_for_day(doctor_id, day_of_week, auth_token)
            .await?
        {
            Some(window) => window,
            None => {
                debug!("Doctor {} has no window on {}", doctor_id, day_of_week);
                return Ok(vec![]);
            }
        };

        let booked = self
            .appointments
            .booked_slots(doctor_id, date, appointment_id, auth_token)
            .await?;

        let slots = generate_slots(&window, current_slot, &booked);
        debug!("Found {} available slots", slots.len());
        Ok(slots)
    }
}

/// Full weekday name for a date, matching how availability windows are keyed.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Week position of a stored weekday name (Monday first). Unknown names
/// sort after the known ones.
pub fn weekday_index(day_of_week: &str) -> u32 {
    match day_of_week {
        "Monday" => 0,
        "Tuesday" => 1,
        "Wednesday" => 2,
        "Thursday" => 3,
        "Friday" => 4,
        "Saturday" => 5,
        "Sunday" => 6,
        _ => 7,
    }
}

/// Walk the 30-minute grid over `[start_time, end_time)` and keep every
/// candidate that is either the edited appointment's current slot (kept
/// unconditionally) or not occupied by another scheduled appointment.
pub fn generate_slots(
    window: &AvailabilityWindow,
    current_slot: Option<NaiveTime>,
    booked: &HashSet<NaiveTime>,
) -> Vec<SlotDescriptor> {
    let mut slots = Vec::new();
    let mut cursor = window.start_time;

    while cursor < window.end_time {
        if Some(cursor) == current_slot {
            slots.push(SlotDescriptor::new(cursor, true));
        } else if !booked.contains(&cursor) {
            slots.push(SlotDescriptor::new(cursor, false));
        }

        // NaiveTime addition wraps at midnight; stop instead of looping.
        let (next, wrapped) = cursor.overflowing_add_signed(Duration::minutes(SLOT_MINUTES));
        if wrapped != 0 {
            break;
        }
        cursor = next;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn window(start: NaiveTime, end: NaiveTime) -> AvailabilityWindow {
        AvailabilityWindow {
            doctor_id: 7,
            day_of_week: "Monday".to_string(),
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn morning_window_yields_six_slots() {
        let slots = generate_slots(&window(time(9, 0), time(12, 0)), None, &HashSet::new());

        let times: Vec<NaiveTime> = slots.iter().map(|s| s.time).collect();
        assert_eq!(
            times,
            vec![
                time(9, 0),
                time(9, 30),
                time(10, 0),
                time(10, 30),
                time(11, 0),
                time(11, 30),
            ]
        );
        assert!(slots.iter().all(|s| !s.is_current));
    }

    #[test]
    fn slot_equal_to_end_time_is_excluded() {
        let slots = generate_slots(&window(time(9, 0), time(10, 0)), None, &HashSet::new());

        assert_eq!(slots.len(), 2);
        assert_eq!(slots.last().unwrap().time, time(9, 30));
    }

    #[test]
    fn booked_slot_is_omitted() {
        let booked: HashSet<NaiveTime> = [time(9, 30)].into_iter().collect();
        let slots = generate_slots(&window(time(9, 0), time(12, 0)), None, &booked);

        assert_eq!(slots.len(), 5);
        assert!(!slots.iter().any(|s| s.time == time(9, 30)));
    }

    #[test]
    fn current_slot_is_kept_even_when_booked() {
        let booked: HashSet<NaiveTime> = [time(10, 0)].into_iter().collect();
        let slots = generate_slots(&window(time(9, 0), time(12, 0)), Some(time(10, 0)), &booked);

        let current: Vec<&SlotDescriptor> = slots.iter().filter(|s| s.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].time, time(10, 0));
        assert_eq!(slots.len(), 6);
    }

    #[test]
    fn booked_current_conflict_only_affects_other_slots() {
        let booked: HashSet<NaiveTime> = [time(9, 30), time(11, 0)].into_iter().collect();
        let slots = generate_slots(&window(time(9, 0), time(12, 0)), Some(time(11, 0)), &booked);

        let times: Vec<NaiveTime> = slots.iter().map(|s| s.time).collect();
        assert_eq!(
            times,
            vec![time(9, 0), time(10, 0), time(10, 30), time(11, 0), time(11, 30)]
        );
        assert!(slots[3].is_current);
    }

    #[test]
    fn generation_is_deterministic() {
        let booked: HashSet<NaiveTime> = [time(9, 30)].into_iter().collect();
        let win = window(time(9, 0), time(12, 0));

        let first = generate_slots(&win, Some(time(10, 0)), &booked);
        let second = generate_slots(&win, Some(time(10, 0)), &booked);
        assert_eq!(first, second);
    }

    #[test]
    fn slots_are_formatted_for_display() {
        let slots = generate_slots(&window(time(9, 0), time(10, 0)), None, &HashSet::new());

        assert_eq!(slots[0].formatted_time, "09:00 AM");
        assert_eq!(slots[1].formatted_time, "09:30 AM");

        let afternoon = generate_slots(&window(time(13, 0), time(14, 0)), None, &HashSet::new());
        assert_eq!(afternoon[0].formatted_time, "01:00 PM");
    }

    #[test]
    fn window_near_midnight_terminates() {
        let slots = generate_slots(
            &window(time(23, 0), time(23, 59)),
            None,
            &HashSet::new(),
        );

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].time, time(23, 30));
    }

    #[test]
    fn weekday_index_orders_the_week() {
        let mut days = vec!["Friday", "Monday", "Sunday", "Wednesday"];
        days.sort_by_key(|day| weekday_index(day));
        assert_eq!(days, vec!["Monday", "Wednesday", "Friday", "Sunday"]);
        assert_eq!(weekday_index("Someday"), 7);
    }

    #[test]
    fn weekday_names_are_full() {
        // 2025-01-06 is a Monday
        assert_eq!(weekday_name(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()), "Monday");
        assert_eq!(weekday_name(NaiveDate::from_ymd_opt(2025, 1, 12).unwrap()), "Sunday");
    }
}

use std::collections::HashSet;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, STATUS_SCHEDULED};

/// Read-only view of the appointments table, scoped to what slot
/// generation needs.
pub struct AppointmentStore {
    supabase: SupabaseClient,
}

impl AppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Current time slot of the appointment being edited, or `None` if the
    /// appointment does not exist.
    pub async fn time_slot(
        &self,
        appointment_id: i64,
        auth_token: &str,
    ) -> Result<Option<NaiveTime>> {
        debug!("Looking up time slot for appointment: {}", appointment_id);

        let path = format!("/rest/v1/appointments?id=eq.{}&limit=1", appointment_id);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let appointment = match result.into_iter().next() {
            Some(row) => serde_json::from_value::<Appointment>(row)?,
            None => return Ok(None),
        };

        Ok(Some(appointment.time_slot))
    }

    /// Time slots occupied by scheduled appointments for the doctor on the
    /// given date, excluding the appointment being edited.
    pub async fn booked_slots(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        excluding_appointment_id: i64,
        auth_token: &str,
    ) -> Result<HashSet<NaiveTime>> {
        debug!(
            "Fetching booked slots for doctor {} on {} (excluding appointment {})",
            doctor_id, date, excluding_appointment_id
        );

        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&appointment_date=eq.{}&status=eq.{}&id=neq.{}",
            doctor_id, date, STATUS_SCHEDULED, excluding_appointment_id
        );
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let appointments: Vec<Appointment> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Appointment>, _>>()?;

        Ok(appointments.into_iter().map(|apt| apt.time_slot).collect())
    }
}

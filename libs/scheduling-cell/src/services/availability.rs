use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::AvailabilityWindow;
use crate::services::slots::weekday_index;

/// Read-only view of the doctor_weekly_availability table.
pub struct AvailabilityStore {
    supabase: SupabaseClient,
}

impl AvailabilityStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Availability window for a doctor on a weekday, or `None` if the
    /// doctor does not work that day. If duplicate rows exist, the first
    /// row returned wins.
    pub async fn window_for_day(
        &self,
        doctor_id: i64,
        day_of_week: &str,
        auth_token: &str,
    ) -> Result<Option<AvailabilityWindow>> {
        debug!(
            "Fetching availability window for doctor {} on {}",
            doctor_id, day_of_week
        );

        let path = format!(
            "/rest/v1/doctor_weekly_availability?doctor_id=eq.{}&day_of_week=eq.{}&limit=1",
            doctor_id, day_of_week
        );
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        match result.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    /// All configured weekly windows for a doctor.
    pub async fn weekly_schedule(
        &self,
        doctor_id: i64,
        auth_token: &str,
    ) -> Result<Vec<AvailabilityWindow>> {
        debug!("Fetching weekly schedule for doctor: {}", doctor_id);

        let path = format!(
            "/rest/v1/doctor_weekly_availability?doctor_id=eq.{}&order=start_time.asc",
            doctor_id
        );
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let mut windows: Vec<AvailabilityWindow> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<AvailabilityWindow>, _>>()?;

        // The store orders by start time only; weekday names cannot be
        // ordered server-side, so put the week in order here.
        windows.sort_by_key(|window| (weekday_index(&window.day_of_week), window.start_time));

        Ok(windows)
    }
}

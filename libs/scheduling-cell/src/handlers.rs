use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::SchedulingError;
use crate::services::{AvailabilityStore, SlotService};

#[derive(Debug, Deserialize)]
pub struct EditSlotsQuery {
    pub date: String,
    pub appointment_id: i64,
}

fn map_scheduling_error(err: SchedulingError) -> AppError {
    match err {
        SchedulingError::InvalidParameters(msg) => AppError::BadRequest(msg),
        SchedulingError::DataAccess(msg) => AppError::Internal(msg),
    }
}

/// Slots available for rebooking an existing appointment. Admin only.
#[axum::debug_handler]
pub async fn get_edit_slots(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<EditSlotsQuery>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    // Only admins manage appointment rebooking
    if !user.is_admin() {
        return Err(AppError::Auth(
            "Only administrators can view appointment edit slots".to_string(),
        ));
    }

    let slot_service = SlotService::new(&state);

    let slots = slot_service
        .edit_slots(doctor_id, &query.date, query.appointment_id, token)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": query.date,
        "appointment_id": query.appointment_id,
        "slots": slots,
        "total": slots.len()
    })))
}

/// Configured weekly availability windows for a doctor. Admin only.
#[axum::debug_handler]
pub async fn get_weekly_availability(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_admin() {
        return Err(AppError::Auth(
            "Only administrators can view doctor availability".to_string(),
        ));
    }

    if doctor_id <= 0 {
        return Err(AppError::BadRequest(
            "Doctor id must be a positive integer".to_string(),
        ));
    }

    let availability_store = AvailabilityStore::new(&state);

    let windows = availability_store
        .weekly_schedule(doctor_id, token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "availability": windows,
        "total": windows.len()
    })))
}

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::extract::JsonOrForm;
use crate::state::AppState;
use crate::store::Vehicle;

use super::dto::{CreateVehicleRequest, CreatedVehicle, SearchParams};

pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/search", get(search_vehicles))
        .route("/vehicles/:id", delete(delete_vehicle))
}

#[instrument(skip(state, _user))]
pub async fn list_vehicles(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let vehicles = state.store.list_vehicles().await?;
    Ok(Json(vehicles))
}

#[instrument(skip(state, _user))]
pub async fn search_vehicles(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let vehicles = state.store.search_vehicles(params.q.trim()).await?;
    Ok(Json(vehicles))
}

#[instrument(skip(state, _user, payload))]
pub async fn create_vehicle(
    State(state): State<AppState>,
    _user: CurrentUser,
    JsonOrForm(payload): JsonOrForm<CreateVehicleRequest>,
) -> Result<Json<CreatedVehicle>, ApiError> {
    let fields = payload
        .into_fields()
        .ok_or_else(|| ApiError::Validation("All fields are required".into()))?;
    let id = state.store.insert_vehicle(&fields).await?;
    info!(id, license_plate = %fields.license_plate, "vehicle registered");
    Ok(Json(CreatedVehicle {
        id,
        message: "Vehicle added successfully",
    }))
}

#[instrument(skip(state, _user))]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_vehicle(id).await? {
        return Err(ApiError::NotFound("Vehicle"));
    }
    info!(id, "vehicle deleted");
    Ok(Json(json!({ "message": "Vehicle deleted successfully" })))
}

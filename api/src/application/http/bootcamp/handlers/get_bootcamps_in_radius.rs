use axum::extract::{Path, State};
use devcamper_core::domain::bootcamp::{
    entities::Bootcamp, ports::BootcampService, value_objects::RadiusSearchInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetBootcampsInRadiusResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Bootcamp>,
}

#[utoipa::path(
    get,
    path = "/radius/{zipcode}/{distance}",
    tag = "bootcamp",
    summary = "Get bootcamps within a radius",
    description = "Geocodes the zipcode and returns the bootcamps located within `distance` kilometers of it.",
    params(
        ("zipcode" = String, Path, description = "Zipcode of the center"),
        ("distance" = String, Path, description = "Radius in kilometers"),
    ),
    responses(
        (status = 200, body = GetBootcampsInRadiusResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    )
)]
pub async fn get_bootcamps_in_radius(
    Path((zipcode, distance)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Response<GetBootcampsInRadiusResponse>, ApiError> {
    let bootcamps = state
        .service
        .get_bootcamps_in_radius(RadiusSearchInput { zipcode, distance })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetBootcampsInRadiusResponse {
        success: true,
        count: bootcamps.len(),
        data: bootcamps,
    }))
}

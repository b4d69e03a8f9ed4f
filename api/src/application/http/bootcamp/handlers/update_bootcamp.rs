use axum::extract::{Path, State};
use devcamper_core::domain::bootcamp::ports::BootcampService;

use super::get_bootcamp::BootcampResponse;
use crate::application::http::{
    bootcamp::validators::UpdateBootcampValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson, parse_resource_id},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "bootcamp",
    summary = "Update bootcamp",
    description = "Updates the provided fields. A changed address is geocoded again.",
    params(
        ("id" = String, Path, description = "Bootcamp ID"),
    ),
    request_body = UpdateBootcampValidator,
    responses(
        (status = 200, body = BootcampResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse)
    )
)]
pub async fn update_bootcamp(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdateBootcampValidator>,
) -> Result<Response<BootcampResponse>, ApiError> {
    let id = parse_resource_id(&id)?;

    let bootcamp = state
        .service
        .update_bootcamp(id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(BootcampResponse {
        success: true,
        data: bootcamp,
    }))
}

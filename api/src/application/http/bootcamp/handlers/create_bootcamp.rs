use axum::extract::State;
use devcamper_core::domain::bootcamp::ports::BootcampService;

use super::get_bootcamp::BootcampResponse;
use crate::application::http::{
    bootcamp::validators::CreateBootcampValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "bootcamp",
    summary = "Create bootcamp",
    description = "Creates a bootcamp. The slug is derived from the name and the address is geocoded into `location`.",
    request_body = CreateBootcampValidator,
    responses(
        (status = 201, body = BootcampResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    )
)]
pub async fn create_bootcamp(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateBootcampValidator>,
) -> Result<Response<BootcampResponse>, ApiError> {
    let bootcamp = state
        .service
        .create_bootcamp(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(BootcampResponse {
        success: true,
        data: bootcamp,
    }))
}

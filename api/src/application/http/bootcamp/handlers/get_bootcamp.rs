use axum::extract::{Path, State};
use devcamper_core::domain::bootcamp::{entities::Bootcamp, ports::BootcampService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse, parse_resource_id},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BootcampResponse {
    pub success: bool,
    pub data: Bootcamp,
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "bootcamp",
    summary = "Get bootcamp",
    params(
        ("id" = String, Path, description = "Bootcamp ID"),
    ),
    responses(
        (status = 200, body = BootcampResponse),
        (status = 404, body = ApiErrorResponse)
    )
)]
pub async fn get_bootcamp(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<BootcampResponse>, ApiError> {
    let id = parse_resource_id(&id)?;

    let bootcamp = state
        .service
        .get_bootcamp(id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(BootcampResponse {
        success: true,
        data: bootcamp,
    }))
}

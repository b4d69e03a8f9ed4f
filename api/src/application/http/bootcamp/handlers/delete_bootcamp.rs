use axum::extract::{Path, State};
use devcamper_core::domain::bootcamp::ports::BootcampService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse, parse_resource_id},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Empty {}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteBootcampResponse {
    pub success: bool,
    pub data: Empty,
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "bootcamp",
    summary = "Delete bootcamp",
    description = "Deletes a bootcamp together with its courses.",
    params(
        ("id" = String, Path, description = "Bootcamp ID"),
    ),
    responses(
        (status = 200, body = DeleteBootcampResponse),
        (status = 404, body = ApiErrorResponse)
    )
)]
pub async fn delete_bootcamp(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<DeleteBootcampResponse>, ApiError> {
    let id = parse_resource_id(&id)?;

    state
        .service
        .delete_bootcamp(id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteBootcampResponse {
        success: true,
        data: Empty::default(),
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_data_serializes_as_object() {
        let body = DeleteBootcampResponse {
            success: true,
            data: Empty::default(),
        };

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "success": true, "data": {} })
        );
    }
}

use axum::extract::State;
use devcamper_core::domain::{
    bootcamp::ports::BootcampService,
    query::entities::{Pagination, QueryPlan},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::application::http::{
    query_extractor::QueryParamsExtractor,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetBootcampsResponse {
    pub success: bool,
    pub count: usize,
    pub pagination: Pagination,
    /// Bootcamps with their courses, restricted to `select` fields when given.
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "bootcamp",
    summary = "Get bootcamps",
    description = "Lists bootcamps. Any non reserved query parameter filters on the field of the same name, bracket operators (`averageCost[gte]=1000`) compare. `select`, `sort`, `page` and `limit` shape the result.",
    params(
        ("select" = Option<String>, Query, description = "Comma separated fields to return"),
        ("sort" = Option<String>, Query, description = "Comma separated fields, `-` prefix for descending. Defaults to `-createdAt`"),
        ("page" = Option<u64>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<u64>, Query, description = "Page size, defaults to 25"),
    ),
    responses(
        (status = 200, body = GetBootcampsResponse),
        (status = 400, body = ApiErrorResponse)
    )
)]
pub async fn get_bootcamps(
    State(state): State<AppState>,
    QueryParamsExtractor(query_params): QueryParamsExtractor,
) -> Result<Response<GetBootcampsResponse>, ApiError> {
    let plan = QueryPlan::translate(&query_params);

    let page = state
        .service
        .list_bootcamps(plan)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetBootcampsResponse {
        success: true,
        count: page.data.len(),
        pagination: page.pagination,
        data: page.data,
    }))
}

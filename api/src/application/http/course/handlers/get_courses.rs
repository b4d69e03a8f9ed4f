use axum::extract::State;
use devcamper_core::domain::course::{entities::Course, ports::CourseService};
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
pub struct GetCoursesResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Course>,
}

#[utoipa::path(
    get,
    path = "/courses",
    tag = "course",
    summary = "Get courses",
    description = "Lists every course with the name and description of its bootcamp.",
    responses(
        (status = 200, body = GetCoursesResponse),
        (status = 500, body = ApiErrorResponse)
    )
)]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Response<GetCoursesResponse>, ApiError> {
    let courses = state
        .service
        .get_courses(None)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetCoursesResponse {
        success: true,
        count: courses.len(),
        data: courses,
    }))
}

use axum::extract::{Path, State};
use devcamper_core::domain::course::ports::CourseService;

use super::get_courses::GetCoursesResponse;
use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse, parse_resource_id},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/bootcamps/{id}/courses",
    tag = "course",
    summary = "Get bootcamp courses",
    description = "Lists the courses of one bootcamp.",
    params(
        ("id" = String, Path, description = "Bootcamp ID"),
    ),
    responses(
        (status = 200, body = GetCoursesResponse),
        (status = 404, body = ApiErrorResponse)
    )
)]
pub async fn get_bootcamp_courses(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetCoursesResponse>, ApiError> {
    let bootcamp_id = parse_resource_id(&id)?;

    let courses = state
        .service
        .get_courses(Some(bootcamp_id))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetCoursesResponse {
        success: true,
        count: courses.len(),
        data: courses,
    }))
}

use super::handlers::{
    get_bootcamp_courses::{__path_get_bootcamp_courses, get_bootcamp_courses},
    get_courses::{__path_get_courses, get_courses},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_courses, get_bootcamp_courses))]
pub struct CourseApiDoc;

pub fn course_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/courses", state.args.server.root_path),
            get(get_courses),
        )
        .route(
            &format!("{}/bootcamps/{{id}}/courses", state.args.server.root_path),
            get(get_bootcamp_courses),
        )
}

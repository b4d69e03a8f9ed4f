use super::handlers::{
    create_bootcamp::{__path_create_bootcamp, create_bootcamp},
    delete_bootcamp::{__path_delete_bootcamp, delete_bootcamp},
    get_bootcamp::{__path_get_bootcamp, get_bootcamp},
    get_bootcamps::{__path_get_bootcamps, get_bootcamps},
    get_bootcamps_in_radius::{__path_get_bootcamps_in_radius, get_bootcamps_in_radius},
    update_bootcamp::{__path_update_bootcamp, update_bootcamp},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_bootcamps,
    get_bootcamp,
    create_bootcamp,
    update_bootcamp,
    delete_bootcamp,
    get_bootcamps_in_radius
))]
pub struct BootcampApiDoc;

pub fn bootcamp_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/bootcamps", state.args.server.root_path),
            get(get_bootcamps).post(create_bootcamp),
        )
        .route(
            &format!(
                "{}/bootcamps/radius/{{zipcode}}/{{distance}}",
                state.args.server.root_path
            ),
            get(get_bootcamps_in_radius),
        )
        .route(
            &format!("{}/bootcamps/{{id}}", state.args.server.root_path),
            get(get_bootcamp)
                .put(update_bootcamp)
                .delete(delete_bootcamp),
        )
}

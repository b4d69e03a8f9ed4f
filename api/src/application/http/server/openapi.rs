use crate::application::http::{
    bootcamp::router::BootcampApiDoc, course::router::CourseApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevCamper API",
        description = "Bootcamps, their courses and a radius search over their locations."
    ),
    nest(
        (path = "/bootcamps", api = BootcampApiDoc),
    )
)]
pub struct ApiDoc;

/// Full document. Course paths span two resources and are merged unprefixed.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(CourseApiDoc::openapi());
    openapi
}

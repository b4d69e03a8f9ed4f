use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    bootcamp::ports::{BootcampRepository, Geocoder},
    common::{entities::app_errors::CoreError, services::Service},
    course::{
        entities::Course,
        ports::{CourseRepository, CourseService},
    },
};

impl<B, C, G> CourseService for Service<B, C, G>
where
    B: BootcampRepository,
    C: CourseRepository,
    G: Geocoder,
{
    #[instrument(skip(self))]
    async fn get_courses(&self, bootcamp_id: Option<Uuid>) -> Result<Vec<Course>, CoreError> {
        match bootcamp_id {
            Some(bootcamp_id) => self.course_repository.find_by_bootcamp(bootcamp_id).await,
            None => self.course_repository.find_all().await,
        }
    }
}

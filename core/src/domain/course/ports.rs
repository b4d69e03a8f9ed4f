use std::future::Future;

use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, course::entities::Course};

pub trait CourseService: Send + Sync {
    /// All courses with their bootcamp populated, or the courses of one bootcamp.
    fn get_courses(
        &self,
        bootcamp_id: Option<Uuid>,
    ) -> impl Future<Output = Result<Vec<Course>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait CourseRepository: Send + Sync {
    fn find_all(&self) -> impl Future<Output = Result<Vec<Course>, CoreError>> + Send;

    fn find_by_bootcamp(
        &self,
        bootcamp_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Course>, CoreError>> + Send;
}

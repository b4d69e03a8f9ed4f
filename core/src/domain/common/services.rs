use crate::domain::{
    bootcamp::ports::{BootcampRepository, Geocoder},
    course::ports::CourseRepository,
};

#[derive(Clone)]
pub struct Service<B, C, G>
where
    B: BootcampRepository,
    C: CourseRepository,
    G: Geocoder,
{
    pub(crate) bootcamp_repository: B,
    pub(crate) course_repository: C,
    pub(crate) geocoder: G,
}

impl<B, C, G> Service<B, C, G>
where
    B: BootcampRepository,
    C: CourseRepository,
    G: Geocoder,
{
    pub fn new(bootcamp_repository: B, course_repository: C, geocoder: G) -> Self {
        Self {
            bootcamp_repository,
            course_repository,
            geocoder,
        }
    }
}

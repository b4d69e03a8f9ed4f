pub mod get_bootcamp_courses;
pub mod get_courses;

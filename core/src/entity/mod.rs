pub mod bootcamps;
pub mod courses;

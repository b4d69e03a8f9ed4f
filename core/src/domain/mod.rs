pub mod bootcamp;
pub mod common;
pub mod course;
pub mod query;

pub mod bootcamp;
pub mod course;
pub mod query_extractor;
pub mod query_params;
pub mod server;

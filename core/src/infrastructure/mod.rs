pub mod bootcamp;
pub mod course;
pub mod db;
pub mod geocoder;

pub mod bootcamp_repository;

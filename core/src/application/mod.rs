use crate::{
    domain::common::{DevcamperConfig, services::Service},
    infrastructure::{
        bootcamp::repositories::bootcamp_repository::PostgresBootcampRepository,
        course::repositories::course_repository::PostgresCourseRepository,
        db::postgres::Postgres, geocoder::http_geocoder::HttpGeocoder,
    },
};

pub type DevcamperService =
    Service<PostgresBootcampRepository, PostgresCourseRepository, HttpGeocoder>;

pub async fn create_service(config: DevcamperConfig) -> Result<DevcamperService, anyhow::Error> {
    let postgres = Postgres::new(&config.database).await?;

    let bootcamp_repository = PostgresBootcampRepository::new(postgres.get_db());
    let course_repository = PostgresCourseRepository::new(postgres.get_db());
    let geocoder = HttpGeocoder::new(config.geocoder);

    Ok(Service::new(bootcamp_repository, course_repository, geocoder))
}

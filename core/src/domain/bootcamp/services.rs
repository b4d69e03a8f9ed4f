use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::domain::{
    bootcamp::{
        entities::{Bootcamp, Location},
        ports::{BootcampRepository, BootcampService, Geocoder},
        value_objects::{
            BootcampFilter, BootcampPage, BootcampProjection, BootcampSort, CreateBootcampInput,
            GeoRadius, RadiusSearchInput, UpdateBootcampInput, parse_distance,
        },
    },
    common::{entities::app_errors::CoreError, services::Service},
    course::ports::CourseRepository,
    query::entities::QueryPlan,
};

impl<B, C, G> BootcampService for Service<B, C, G>
where
    B: BootcampRepository,
    C: CourseRepository,
    G: Geocoder,
{
    #[instrument(skip(self, plan), fields(page = plan.page, limit = plan.limit))]
    async fn list_bootcamps(&self, plan: QueryPlan) -> Result<BootcampPage, CoreError> {
        let filter = BootcampFilter::try_from(&plan.filter)?;
        let sort = BootcampSort::try_from(&plan)?;
        let projection = BootcampProjection::try_from(&plan)?;

        let total = self.bootcamp_repository.count(filter.clone()).await?;
        let pagination = plan.paginate(total);

        let bootcamps = self
            .bootcamp_repository
            .find(filter, sort, plan.skip, plan.limit)
            .await?;

        let data = bootcamps
            .iter()
            .map(|bootcamp| {
                serde_json::to_value(bootcamp)
                    .map(|document| projection.apply(document))
                    .map_err(|e| {
                        error!("Failed to serialize bootcamp {}: {}", bootcamp.id, e);
                        CoreError::InternalServerError
                    })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(BootcampPage { pagination, data })
    }

    #[instrument(skip(self))]
    async fn get_bootcamp(&self, id: Uuid) -> Result<Bootcamp, CoreError> {
        self.bootcamp_repository
            .get_by_id(id)
            .await?
            .ok_or(CoreError::BootcampNotFound(id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_bootcamp(&self, input: CreateBootcampInput) -> Result<Bootcamp, CoreError> {
        let address = self.geocoder.geocode(input.address.clone()).await?;
        let bootcamp = Bootcamp::new(input, Some(Location::from(address)));

        let created = self.bootcamp_repository.create(bootcamp).await?;

        info!(bootcamp_id = %created.id, slug = %created.slug, "Bootcamp created");

        Ok(created)
    }

    #[instrument(skip(self, input))]
    async fn update_bootcamp(
        &self,
        id: Uuid,
        input: UpdateBootcampInput,
    ) -> Result<Bootcamp, CoreError> {
        let mut bootcamp = self
            .bootcamp_repository
            .get_by_id(id)
            .await?
            .ok_or(CoreError::BootcampNotFound(id))?;

        let location = match &input.address {
            Some(address) if *address != bootcamp.address => {
                Some(Location::from(self.geocoder.geocode(address.clone()).await?))
            }
            _ => None,
        };

        bootcamp.update(input, location);

        let updated = self.bootcamp_repository.update(bootcamp).await?;

        info!(bootcamp_id = %updated.id, "Bootcamp updated");

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_bootcamp(&self, id: Uuid) -> Result<(), CoreError> {
        self.bootcamp_repository
            .get_by_id(id)
            .await?
            .ok_or(CoreError::BootcampNotFound(id))?;

        self.bootcamp_repository.delete(id).await?;

        info!(bootcamp_id = %id, "Bootcamp deleted");

        Ok(())
    }

    #[instrument(skip(self, input), fields(zipcode = %input.zipcode, distance = %input.distance))]
    async fn get_bootcamps_in_radius(
        &self,
        input: RadiusSearchInput,
    ) -> Result<Vec<Bootcamp>, CoreError> {
        let distance_km = parse_distance(&input.distance)?;
        let address = self.geocoder.geocode(input.zipcode).await?;

        self.bootcamp_repository
            .find_within_radius(GeoRadius {
                center: address.point,
                distance_km,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        bootcamp::{
            ports::{MockBootcampRepository, MockGeocoder},
            value_objects::{BootcampField, GeoPoint, GeocodedAddress},
        },
        course::ports::MockCourseRepository,
        query::{
            entities::{PageRef, SortDirection},
            value_objects::QueryParams,
        },
    };

    fn boston() -> GeocodedAddress {
        GeocodedAddress {
            point: GeoPoint {
                latitude: 42.3601,
                longitude: -71.0589,
            },
            formatted_address: Some("233 Bay State Rd, Boston, MA 02215, US".to_string()),
            street: Some("233 Bay State Rd".to_string()),
            city: Some("Boston".to_string()),
            state: Some("MA".to_string()),
            zipcode: Some("02215".to_string()),
            country: Some("US".to_string()),
        }
    }

    fn create_input(name: &str) -> CreateBootcampInput {
        CreateBootcampInput {
            name: name.to_string(),
            description: "Full stack web development".to_string(),
            website: Some("https://devworks.com".to_string()),
            phone: None,
            email: Some("enroll@devworks.com".to_string()),
            address: "233 Bay State Rd Boston MA 02215".to_string(),
            careers: vec!["Web Development".to_string()],
            average_rating: None,
            average_cost: Some(10000.0),
            photo: None,
            housing: Some(true),
            job_assistance: None,
            job_guarantee: None,
            accept_gi: None,
        }
    }

    fn bootcamp(name: &str) -> Bootcamp {
        Bootcamp::new(create_input(name), Some(Location::from(boston())))
    }

    fn service(
        repository: MockBootcampRepository,
        geocoder: MockGeocoder,
    ) -> Service<MockBootcampRepository, MockCourseRepository, MockGeocoder> {
        Service::new(repository, MockCourseRepository::new(), geocoder)
    }

    #[tokio::test]
    async fn test_list_bootcamps_counts_then_pages() {
        let listed = bootcamp("Devworks Bootcamp");
        let listed_id = listed.id;

        let mut repository = MockBootcampRepository::new();
        repository
            .expect_count()
            .withf(|filter| filter.conditions.len() == 1)
            .times(1)
            .returning(|_| Box::pin(async { Ok(25) }));
        repository
            .expect_find()
            .withf(|_, sort, skip, limit| {
                sort.keys[0].field == BootcampField::Name
                    && sort.keys[0].direction == SortDirection::Asc
                    && *skip == 10
                    && *limit == 10
            })
            .times(1)
            .returning(move |_, _, _, _| {
                let listed = listed.clone();
                Box::pin(async move { Ok(vec![listed]) })
            });

        let params: QueryParams = [
            ("select", "name,housing"),
            ("sort", "name"),
            ("page", "2"),
            ("limit", "10"),
            ("housing", "true"),
        ]
        .into_iter()
        .collect();

        let page = service(repository, MockGeocoder::new())
            .list_bootcamps(QueryPlan::translate(&params))
            .await
            .unwrap();

        assert_eq!(page.pagination.next, Some(PageRef { page: 3, limit: 10 }));
        assert_eq!(page.pagination.prev, Some(PageRef { page: 1, limit: 10 }));
        assert_eq!(
            page.data,
            vec![json!({ "id": listed_id, "name": "Devworks Bootcamp", "housing": true })]
        );
    }

    #[tokio::test]
    async fn test_list_bootcamps_rejects_unknown_filter_before_querying() {
        let mut repository = MockBootcampRepository::new();
        repository.expect_count().never();
        repository.expect_find().never();

        let params: QueryParams = [("owner", "me")].into_iter().collect();
        let result = service(repository, MockGeocoder::new())
            .list_bootcamps(QueryPlan::translate(&params))
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_get_bootcamp_not_found() {
        let id = Uuid::new_v4();
        let mut repository = MockBootcampRepository::new();
        repository
            .expect_get_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let result = service(repository, MockGeocoder::new())
            .get_bootcamp(id)
            .await;

        assert_eq!(result, Err(CoreError::BootcampNotFound(id)));
    }

    #[tokio::test]
    async fn test_create_bootcamp_geocodes_address() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .withf(|address| address == "233 Bay State Rd Boston MA 02215")
            .times(1)
            .returning(|_| Box::pin(async { Ok(boston()) }));

        let mut repository = MockBootcampRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|bootcamp| Box::pin(async move { Ok(bootcamp) }));

        let created = service(repository, geocoder)
            .create_bootcamp(create_input("Devworks Bootcamp"))
            .await
            .unwrap();

        assert_eq!(created.slug, "devworks-bootcamp");
        assert_eq!(created.photo, "no-photo.jpg");
        let location = created.location.unwrap();
        assert_eq!(location.city.as_deref(), Some("Boston"));
        assert_eq!(location.latitude, 42.3601);
    }

    #[tokio::test]
    async fn test_update_bootcamp_keeps_location_when_address_unchanged() {
        let existing = bootcamp("Devworks Bootcamp");
        let id = existing.id;

        let mut repository = MockBootcampRepository::new();
        repository
            .expect_get_by_id()
            .returning(move |_| {
                let existing = existing.clone();
                Box::pin(async move { Ok(Some(existing)) })
            });
        repository
            .expect_update()
            .returning(|bootcamp| Box::pin(async move { Ok(bootcamp) }));

        let mut geocoder = MockGeocoder::new();
        geocoder.expect_geocode().never();

        let updated = service(repository, geocoder)
            .update_bootcamp(
                id,
                UpdateBootcampInput {
                    name: Some("ModernTech Bootcamp".to_string()),
                    address: Some("233 Bay State Rd Boston MA 02215".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "ModernTech Bootcamp");
        assert_eq!(updated.slug, "moderntech-bootcamp");
        assert!(updated.location.is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_bootcamp_does_not_delete() {
        let id = Uuid::new_v4();
        let mut repository = MockBootcampRepository::new();
        repository
            .expect_get_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));
        repository.expect_delete().never();

        let result = service(repository, MockGeocoder::new())
            .delete_bootcamp(id)
            .await;

        assert_eq!(result, Err(CoreError::BootcampNotFound(id)));
    }

    #[tokio::test]
    async fn test_radius_search_uses_geocoded_center() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .withf(|zipcode| zipcode == "02215")
            .returning(|_| Box::pin(async { Ok(boston()) }));

        let mut repository = MockBootcampRepository::new();
        repository
            .expect_find_within_radius()
            .withf(|radius| radius.distance_km == 100.0 && radius.center.latitude == 42.3601)
            .times(1)
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));

        let bootcamps = service(repository, geocoder)
            .get_bootcamps_in_radius(RadiusSearchInput {
                zipcode: "02215".to_string(),
                distance: "100".to_string(),
            })
            .await
            .unwrap();

        assert!(bootcamps.is_empty());
    }

    #[tokio::test]
    async fn test_radius_search_rejects_bad_distance() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_geocode().never();

        let result = service(MockBootcampRepository::new(), geocoder)
            .get_bootcamps_in_radius(RadiusSearchInput {
                zipcode: "02215".to_string(),
                distance: "everywhere".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }
}

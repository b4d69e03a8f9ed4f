use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    bootcamp::{
        entities::Bootcamp,
        value_objects::{
            BootcampFilter, BootcampPage, BootcampSort, CreateBootcampInput, GeoRadius,
            GeocodedAddress, RadiusSearchInput, UpdateBootcampInput,
        },
    },
    common::entities::app_errors::CoreError,
    query::entities::QueryPlan,
};

pub trait BootcampService: Send + Sync {
    /// Runs a translated list query: counts the matches, then loads one page with courses.
    fn list_bootcamps(
        &self,
        plan: QueryPlan,
    ) -> impl Future<Output = Result<BootcampPage, CoreError>> + Send;

    fn get_bootcamp(&self, id: Uuid) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    fn create_bootcamp(
        &self,
        input: CreateBootcampInput,
    ) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    fn update_bootcamp(
        &self,
        id: Uuid,
        input: UpdateBootcampInput,
    ) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    fn delete_bootcamp(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_bootcamps_in_radius(
        &self,
        input: RadiusSearchInput,
    ) -> impl Future<Output = Result<Vec<Bootcamp>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait BootcampRepository: Send + Sync {
    fn count(&self, filter: BootcampFilter) -> impl Future<Output = Result<u64, CoreError>> + Send;

    /// Matching bootcamps in sort order, each with its courses populated.
    fn find(
        &self,
        filter: BootcampFilter,
        sort: BootcampSort,
        skip: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Bootcamp>, CoreError>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = Result<Option<Bootcamp>, CoreError>> + Send;

    fn create(&self, bootcamp: Bootcamp) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    fn update(&self, bootcamp: Bootcamp) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    /// Removes the bootcamp together with its courses.
    fn delete(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn find_within_radius(
        &self,
        radius: GeoRadius,
    ) -> impl Future<Output = Result<Vec<Bootcamp>, CoreError>> + Send;
}

/// Port for address lookups
#[cfg_attr(test, mockall::automock)]
pub trait Geocoder: Send + Sync {
    /// Best match for a free-form address or zipcode
    fn geocode(
        &self,
        address: String,
    ) -> impl Future<Output = Result<GeocodedAddress, CoreError>> + Send;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    bootcamp::value_objects::{CreateBootcampInput, GeocodedAddress, UpdateBootcampInput},
    common::{generate_timestamp, slugify},
    course::entities::Course,
};

pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl From<GeocodedAddress> for Location {
    fn from(address: GeocodedAddress) -> Self {
        Self {
            latitude: address.point.latitude,
            longitude: address.point.longitude,
            formatted_address: address.formatted_address,
            street: address.street,
            city: address.city,
            state: address.state,
            zipcode: address.zipcode,
            country: address.country,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub location: Option<Location>,
    pub careers: Vec<String>,
    pub average_rating: Option<f64>,
    pub average_cost: Option<f64>,
    pub photo: String,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
    pub created_at: DateTime<Utc>,
    /// Populated on list queries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
}

impl Bootcamp {
    pub fn new(input: CreateBootcampInput, location: Option<Location>) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            slug: slugify(&input.name),
            name: input.name,
            description: input.description,
            website: input.website,
            phone: input.phone,
            email: input.email,
            address: input.address,
            location,
            careers: input.careers,
            average_rating: input.average_rating,
            average_cost: input.average_cost,
            photo: input.photo.unwrap_or_else(|| DEFAULT_PHOTO.to_string()),
            housing: input.housing.unwrap_or(false),
            job_assistance: input.job_assistance.unwrap_or(false),
            job_guarantee: input.job_guarantee.unwrap_or(false),
            accept_gi: input.accept_gi.unwrap_or(false),
            created_at: now,
            courses: None,
        }
    }

    /// Applies the provided fields. A new `location` replaces the stored one.
    pub fn update(&mut self, input: UpdateBootcampInput, location: Option<Location>) {
        if let Some(name) = input.name {
            self.slug = slugify(&name);
            self.name = name;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(website) = input.website {
            self.website = Some(website);
        }
        if let Some(phone) = input.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = input.email {
            self.email = Some(email);
        }
        if let Some(address) = input.address {
            self.address = address;
        }
        if let Some(location) = location {
            self.location = Some(location);
        }
        if let Some(careers) = input.careers {
            self.careers = careers;
        }
        if let Some(average_rating) = input.average_rating {
            self.average_rating = Some(average_rating);
        }
        if let Some(average_cost) = input.average_cost {
            self.average_cost = Some(average_cost);
        }
        if let Some(photo) = input.photo {
            self.photo = photo;
        }
        if let Some(housing) = input.housing {
            self.housing = housing;
        }
        if let Some(job_assistance) = input.job_assistance {
            self.job_assistance = job_assistance;
        }
        if let Some(job_guarantee) = input.job_guarantee {
            self.job_guarantee = job_guarantee;
        }
        if let Some(accept_gi) = input.accept_gi {
            self.accept_gi = accept_gi;
        }
    }
}

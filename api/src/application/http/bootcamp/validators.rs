use devcamper_core::domain::bootcamp::value_objects::{CreateBootcampInput, UpdateBootcampInput};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBootcampValidator {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: String,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add an address"))]
    pub address: String,

    #[serde(default)]
    pub careers: Vec<String>,

    #[serde(default)]
    pub average_rating: Option<f64>,

    #[serde(default)]
    pub average_cost: Option<f64>,

    #[serde(default)]
    pub photo: Option<String>,

    #[serde(default)]
    pub housing: Option<bool>,

    #[serde(default)]
    pub job_assistance: Option<bool>,

    #[serde(default)]
    pub job_guarantee: Option<bool>,

    #[serde(default)]
    pub accept_gi: Option<bool>,
}

impl From<CreateBootcampValidator> for CreateBootcampInput {
    fn from(payload: CreateBootcampValidator) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            website: payload.website,
            phone: payload.phone,
            email: payload.email,
            address: payload.address,
            careers: payload.careers,
            average_rating: payload.average_rating,
            average_cost: payload.average_cost,
            photo: payload.photo,
            housing: payload.housing,
            job_assistance: payload.job_assistance,
            job_guarantee: payload.job_guarantee,
            accept_gi: payload.accept_gi,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBootcampValidator {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add an address"))]
    pub address: Option<String>,

    #[serde(default)]
    pub careers: Option<Vec<String>>,

    #[serde(default)]
    pub average_rating: Option<f64>,

    #[serde(default)]
    pub average_cost: Option<f64>,

    #[serde(default)]
    pub photo: Option<String>,

    #[serde(default)]
    pub housing: Option<bool>,

    #[serde(default)]
    pub job_assistance: Option<bool>,

    #[serde(default)]
    pub job_guarantee: Option<bool>,

    #[serde(default)]
    pub accept_gi: Option<bool>,
}

impl From<UpdateBootcampValidator> for UpdateBootcampInput {
    fn from(payload: UpdateBootcampValidator) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            website: payload.website,
            phone: payload.phone,
            email: payload.email,
            address: payload.address,
            careers: payload.careers,
            average_rating: payload.average_rating,
            average_cost: payload.average_cost,
            photo: payload.photo,
            housing: payload.housing,
            job_assistance: payload.job_assistance,
            job_guarantee: payload.job_guarantee,
            accept_gi: payload.accept_gi,
        }
    }
}

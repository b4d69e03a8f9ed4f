use sea_orm::ActiveValue::Set;

use crate::{
    domain::bootcamp::entities::{Bootcamp, Location},
    entity::bootcamps::{ActiveModel, Model},
};

impl From<&Model> for Bootcamp {
    fn from(model: &Model) -> Self {
        let location = match (model.latitude, model.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location {
                latitude,
                longitude,
                formatted_address: model.formatted_address.clone(),
                street: model.street.clone(),
                city: model.city.clone(),
                state: model.state.clone(),
                zipcode: model.zipcode.clone(),
                country: model.country.clone(),
            }),
            _ => None,
        };

        Self {
            id: model.id,
            name: model.name.clone(),
            slug: model.slug.clone(),
            description: model.description.clone(),
            website: model.website.clone(),
            phone: model.phone.clone(),
            email: model.email.clone(),
            address: model.address.clone(),
            location,
            careers: model.careers.clone(),
            average_rating: model.average_rating,
            average_cost: model.average_cost,
            photo: model.photo.clone(),
            housing: model.housing,
            job_assistance: model.job_assistance,
            job_guarantee: model.job_guarantee,
            accept_gi: model.accept_gi,
            created_at: model.created_at.to_utc(),
            courses: None,
        }
    }
}

impl From<Model> for Bootcamp {
    fn from(model: Model) -> Self {
        Self::from(&model)
    }
}

impl From<&Bootcamp> for ActiveModel {
    fn from(bootcamp: &Bootcamp) -> Self {
        let location = bootcamp.location.as_ref();

        Self {
            id: Set(bootcamp.id),
            name: Set(bootcamp.name.clone()),
            slug: Set(bootcamp.slug.clone()),
            description: Set(bootcamp.description.clone()),
            website: Set(bootcamp.website.clone()),
            phone: Set(bootcamp.phone.clone()),
            email: Set(bootcamp.email.clone()),
            address: Set(bootcamp.address.clone()),
            latitude: Set(location.map(|l| l.latitude)),
            longitude: Set(location.map(|l| l.longitude)),
            formatted_address: Set(location.and_then(|l| l.formatted_address.clone())),
            street: Set(location.and_then(|l| l.street.clone())),
            city: Set(location.and_then(|l| l.city.clone())),
            state: Set(location.and_then(|l| l.state.clone())),
            zipcode: Set(location.and_then(|l| l.zipcode.clone())),
            country: Set(location.and_then(|l| l.country.clone())),
            careers: Set(bootcamp.careers.clone()),
            average_rating: Set(bootcamp.average_rating),
            average_cost: Set(bootcamp.average_cost),
            photo: Set(bootcamp.photo.clone()),
            housing: Set(bootcamp.housing),
            job_assistance: Set(bootcamp.job_assistance),
            job_guarantee: Set(bootcamp.job_guarantee),
            accept_gi: Set(bootcamp.accept_gi),
            created_at: Set(bootcamp.created_at.fixed_offset()),
        }
    }
}

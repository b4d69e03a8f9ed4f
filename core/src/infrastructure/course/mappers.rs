use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        course::entities::{BootcampRef, BootcampSummary, Course, MinimumSkill},
    },
    entity::{bootcamps, courses},
};

pub fn map_course(model: courses::Model, bootcamp: BootcampRef) -> Result<Course, CoreError> {
    let minimum_skill = MinimumSkill::try_from(model.minimum_skill.as_str()).map_err(|e| {
        error!("Failed to map course {}: {}", model.id, e);
        CoreError::InternalServerError
    })?;

    Ok(Course {
        id: model.id,
        title: model.title,
        description: model.description,
        weeks: model.weeks,
        tuition: model.tuition,
        minimum_skill,
        scholarship_available: model.scholarship_available,
        created_at: model.created_at.to_utc(),
        bootcamp,
    })
}

impl From<&bootcamps::Model> for BootcampSummary {
    fn from(model: &bootcamps::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            description: model.description.clone(),
        }
    }
}

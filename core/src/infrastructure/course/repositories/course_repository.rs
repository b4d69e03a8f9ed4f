use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        course::{
            entities::{BootcampRef, BootcampSummary, Course},
            ports::CourseRepository,
        },
    },
    entity::{
        bootcamps::Entity as BootcampEntity,
        courses::{Column, Entity},
    },
    infrastructure::course::mappers::map_course,
};

#[derive(Debug, Clone)]
pub struct PostgresCourseRepository {
    pub db: DatabaseConnection,
}

impl PostgresCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CourseRepository for PostgresCourseRepository {
    async fn find_all(&self) -> Result<Vec<Course>, CoreError> {
        let rows = Entity::find()
            .find_also_related(BootcampEntity)
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list courses: {}", e);
                CoreError::InternalServerError
            })?;

        rows.into_iter()
            .map(|(course, bootcamp)| {
                let bootcamp = match bootcamp {
                    Some(bootcamp) => BootcampRef::Populated(BootcampSummary::from(&bootcamp)),
                    None => BootcampRef::Id(course.bootcamp_id),
                };
                map_course(course, bootcamp)
            })
            .collect()
    }

    async fn find_by_bootcamp(&self, bootcamp_id: Uuid) -> Result<Vec<Course>, CoreError> {
        let courses = Entity::find()
            .filter(Column::BootcampId.eq(bootcamp_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list courses of bootcamp {}: {}", bootcamp_id, e);
                CoreError::InternalServerError
            })?;

        courses
            .into_iter()
            .map(|course| map_course(course, BootcampRef::Id(bootcamp_id)))
            .collect()
    }
}

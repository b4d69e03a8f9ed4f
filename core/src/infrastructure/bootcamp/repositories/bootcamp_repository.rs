use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseBackend, DatabaseConnection, DbErr,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, SqlErr,
    Statement,
    sea_query::{Expr, SimpleExpr},
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        bootcamp::{
            entities::Bootcamp,
            ports::BootcampRepository,
            value_objects::{
                BootcampField, BootcampFilter, BootcampSort, Comparison, FieldCondition,
                FilterValue, GeoRadius,
            },
        },
        common::entities::app_errors::CoreError,
        course::entities::{BootcampRef, Course},
        query::entities::SortDirection,
    },
    entity::{
        bootcamps::{ActiveModel, Column, Entity},
        courses::{Column as CourseColumn, Entity as CourseEntity},
    },
    infrastructure::course::mappers::map_course,
};

/// Great-circle filter: haversine central angle against the radius in radians.
const WITHIN_RADIUS_SQL: &str = r#"
    SELECT *
    FROM bootcamps
    WHERE latitude IS NOT NULL
      AND longitude IS NOT NULL
      AND 2 * asin(least(1, sqrt(
            power(sin(radians(latitude - $1) / 2), 2)
            + cos(radians($1)) * cos(radians(latitude))
            * power(sin(radians(longitude - $2) / 2), 2)
          ))) <= $3
    ORDER BY created_at DESC
"#;

#[derive(Debug, Clone)]
pub struct PostgresBootcampRepository {
    pub db: DatabaseConnection,
}

impl PostgresBootcampRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_courses(&self, bootcamps: &mut [Bootcamp]) -> Result<(), CoreError> {
        if bootcamps.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = bootcamps.iter().map(|b| b.id).collect();
        let models = CourseEntity::find()
            .filter(CourseColumn::BootcampId.is_in(ids))
            .order_by_asc(CourseColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load bootcamp courses: {}", e);
                CoreError::InternalServerError
            })?;

        let mut courses_by_bootcamp: HashMap<Uuid, Vec<Course>> = HashMap::new();
        for model in models {
            let bootcamp_id = model.bootcamp_id;
            let course = map_course(model, BootcampRef::Id(bootcamp_id))?;
            courses_by_bootcamp
                .entry(bootcamp_id)
                .or_default()
                .push(course);
        }

        for bootcamp in bootcamps.iter_mut() {
            bootcamp.courses = Some(
                courses_by_bootcamp
                    .remove(&bootcamp.id)
                    .unwrap_or_default(),
            );
        }

        Ok(())
    }
}

fn column(field: BootcampField) -> Option<Column> {
    match field {
        BootcampField::Id => Some(Column::Id),
        BootcampField::Name => Some(Column::Name),
        BootcampField::Slug => Some(Column::Slug),
        BootcampField::Description => Some(Column::Description),
        BootcampField::Website => Some(Column::Website),
        BootcampField::Phone => Some(Column::Phone),
        BootcampField::Email => Some(Column::Email),
        BootcampField::Address => Some(Column::Address),
        BootcampField::LocationCity => Some(Column::City),
        BootcampField::LocationState => Some(Column::State),
        BootcampField::LocationZipcode => Some(Column::Zipcode),
        BootcampField::LocationCountry => Some(Column::Country),
        BootcampField::Careers => Some(Column::Careers),
        BootcampField::AverageRating => Some(Column::AverageRating),
        BootcampField::AverageCost => Some(Column::AverageCost),
        BootcampField::Photo => Some(Column::Photo),
        BootcampField::Housing => Some(Column::Housing),
        BootcampField::JobAssistance => Some(Column::JobAssistance),
        BootcampField::JobGuarantee => Some(Column::JobGuarantee),
        BootcampField::AcceptGi => Some(Column::AcceptGi),
        BootcampField::CreatedAt => Some(Column::CreatedAt),
        BootcampField::Location | BootcampField::Courses => None,
    }
}

fn value(value: &FilterValue) -> sea_orm::Value {
    match value {
        FilterValue::Text(text) => text.clone().into(),
        FilterValue::Number(number) => (*number).into(),
        FilterValue::Bool(flag) => (*flag).into(),
        FilterValue::Timestamp(timestamp) => timestamp.fixed_offset().into(),
    }
}

fn career_contains(career: &FilterValue) -> SimpleExpr {
    Expr::cust_with_values(r#"$1 = ANY("careers")"#, [value(career)])
}

fn field_condition(condition: &FieldCondition) -> Result<Condition, CoreError> {
    if condition.field == BootcampField::Careers {
        return Ok(match &condition.comparison {
            Comparison::Eq(career) => Condition::all().add(career_contains(career)),
            Comparison::In(careers) => careers
                .iter()
                .fold(Condition::any(), |any, career| any.add(career_contains(career))),
            _ => {
                return Err(CoreError::Invalid(
                    "Field 'careers' only supports equality and 'in'".to_string(),
                ));
            }
        });
    }

    let column = column(condition.field).ok_or_else(|| {
        CoreError::Invalid(format!(
            "Field '{}' cannot be used as a filter",
            condition.field
        ))
    })?;

    let expr = match &condition.comparison {
        Comparison::Eq(v) => column.eq(value(v)),
        Comparison::Gt(v) => column.gt(value(v)),
        Comparison::Gte(v) => column.gte(value(v)),
        Comparison::Lt(v) => column.lt(value(v)),
        Comparison::Lte(v) => column.lte(value(v)),
        Comparison::In(values) => column.is_in(values.iter().map(value)),
    };

    Ok(Condition::all().add(expr))
}

fn build_condition(filter: &BootcampFilter) -> Result<Condition, CoreError> {
    filter
        .conditions
        .iter()
        .try_fold(Condition::all(), |all, condition| {
            Ok(all.add(field_condition(condition)?))
        })
}

/// Selects bootcamps matching `filter`, without a `WHERE` clause when it is empty.
fn filtered(filter: &BootcampFilter) -> Result<Select<Entity>, CoreError> {
    let query = Entity::find();
    if filter.is_empty() {
        return Ok(query);
    }

    Ok(query.filter(build_condition(filter)?))
}

fn map_write_error(e: DbErr, action: &str) -> CoreError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = e.sql_err() {
        error!("Failed to {} bootcamp, duplicate value: {}", action, detail);
        return CoreError::Duplicate;
    }

    error!("Failed to {} bootcamp: {}", action, e);
    CoreError::InternalServerError
}

impl BootcampRepository for PostgresBootcampRepository {
    async fn count(&self, filter: BootcampFilter) -> Result<u64, CoreError> {
        filtered(&filter)?
            .count(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to count bootcamps: {}", e);
                CoreError::InternalServerError
            })
    }

    async fn find(
        &self,
        filter: BootcampFilter,
        sort: BootcampSort,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Bootcamp>, CoreError> {
        let mut query = filtered(&filter)?;

        for key in &sort.keys {
            let column = column(key.field).ok_or_else(|| {
                CoreError::Invalid(format!("Field '{}' cannot be used for sorting", key.field))
            })?;
            let order = match key.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            query = query.order_by(column, order);
        }

        let models = query
            .order_by_asc(Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list bootcamps: {}", e);
                CoreError::InternalServerError
            })?;

        let mut bootcamps: Vec<Bootcamp> = models.into_iter().map(Bootcamp::from).collect();
        self.load_courses(&mut bootcamps).await?;

        Ok(bootcamps)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Bootcamp>, CoreError> {
        let bootcamp = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get bootcamp: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(bootcamp.map(Bootcamp::from))
    }

    async fn create(&self, bootcamp: Bootcamp) -> Result<Bootcamp, CoreError> {
        let created = Entity::insert(ActiveModel::from(&bootcamp))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| map_write_error(e, "create"))?;

        Ok(Bootcamp::from(created))
    }

    async fn update(&self, bootcamp: Bootcamp) -> Result<Bootcamp, CoreError> {
        let updated = ActiveModel::from(&bootcamp)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::BootcampNotFound(bootcamp.id),
                e => map_write_error(e, "update"),
            })?;

        Ok(Bootcamp::from(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        let result = Entity::delete_by_id(id).exec(&self.db).await.map_err(|e| {
            error!("Failed to delete bootcamp: {}", e);
            CoreError::InternalServerError
        })?;

        if result.rows_affected == 0 {
            return Err(CoreError::BootcampNotFound(id));
        }

        Ok(())
    }

    async fn find_within_radius(&self, radius: GeoRadius) -> Result<Vec<Bootcamp>, CoreError> {
        let statement = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            WITHIN_RADIUS_SQL,
            [
                radius.center.latitude.into(),
                radius.center.longitude.into(),
                radius.radians().into(),
            ],
        );

        let models = Entity::find()
            .from_raw_sql(statement)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to search bootcamps by radius: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(models.into_iter().map(Bootcamp::from).collect())
    }
}

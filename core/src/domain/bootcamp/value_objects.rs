use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{
        entities::{ComparisonOperator, FilterDocument, Pagination, QueryPlan, SortDirection},
        translator,
    },
};

/// Mean equatorial radius used to turn a distance into a central angle.
pub const EARTH_RADIUS_KM: f64 = 6378.0;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBootcampInput {
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub careers: Vec<String>,
    pub average_rating: Option<f64>,
    pub average_cost: Option<f64>,
    pub photo: Option<String>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBootcampInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub careers: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub average_cost: Option<f64>,
    pub photo: Option<String>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

/// Fields of a bootcamp as named in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootcampField {
    Id,
    Name,
    Slug,
    Description,
    Website,
    Phone,
    Email,
    Address,
    Location,
    LocationCity,
    LocationState,
    LocationZipcode,
    LocationCountry,
    Careers,
    AverageRating,
    AverageCost,
    Photo,
    Housing,
    JobAssistance,
    JobGuarantee,
    AcceptGi,
    CreatedAt,
    Courses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextList,
    Number,
    Bool,
    Timestamp,
}

impl FieldKind {
    fn supports(&self, operator: ComparisonOperator) -> bool {
        match self {
            FieldKind::Number | FieldKind::Timestamp => true,
            FieldKind::Text | FieldKind::TextList => operator == ComparisonOperator::In,
            FieldKind::Bool => false,
        }
    }
}

impl BootcampField {
    pub const ALL: [BootcampField; 23] = [
        BootcampField::Id,
        BootcampField::Name,
        BootcampField::Slug,
        BootcampField::Description,
        BootcampField::Website,
        BootcampField::Phone,
        BootcampField::Email,
        BootcampField::Address,
        BootcampField::Location,
        BootcampField::LocationCity,
        BootcampField::LocationState,
        BootcampField::LocationZipcode,
        BootcampField::LocationCountry,
        BootcampField::Careers,
        BootcampField::AverageRating,
        BootcampField::AverageCost,
        BootcampField::Photo,
        BootcampField::Housing,
        BootcampField::JobAssistance,
        BootcampField::JobGuarantee,
        BootcampField::AcceptGi,
        BootcampField::CreatedAt,
        BootcampField::Courses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BootcampField::Id => "id",
            BootcampField::Name => "name",
            BootcampField::Slug => "slug",
            BootcampField::Description => "description",
            BootcampField::Website => "website",
            BootcampField::Phone => "phone",
            BootcampField::Email => "email",
            BootcampField::Address => "address",
            BootcampField::Location => "location",
            BootcampField::LocationCity => "location.city",
            BootcampField::LocationState => "location.state",
            BootcampField::LocationZipcode => "location.zipcode",
            BootcampField::LocationCountry => "location.country",
            BootcampField::Careers => "careers",
            BootcampField::AverageRating => "averageRating",
            BootcampField::AverageCost => "averageCost",
            BootcampField::Photo => "photo",
            BootcampField::Housing => "housing",
            BootcampField::JobAssistance => "jobAssistance",
            BootcampField::JobGuarantee => "jobGuarantee",
            BootcampField::AcceptGi => "acceptGi",
            BootcampField::CreatedAt => "createdAt",
            BootcampField::Courses => "courses",
        }
    }

    /// Value kind when used in a filter, `None` for fields that cannot be filtered on.
    pub fn filter_kind(&self) -> Option<FieldKind> {
        match self {
            BootcampField::Name
            | BootcampField::Slug
            | BootcampField::LocationCity
            | BootcampField::LocationState
            | BootcampField::LocationZipcode
            | BootcampField::LocationCountry => Some(FieldKind::Text),
            BootcampField::Careers => Some(FieldKind::TextList),
            BootcampField::AverageRating | BootcampField::AverageCost => Some(FieldKind::Number),
            BootcampField::Housing
            | BootcampField::JobAssistance
            | BootcampField::JobGuarantee
            | BootcampField::AcceptGi => Some(FieldKind::Bool),
            BootcampField::CreatedAt => Some(FieldKind::Timestamp),
            _ => None,
        }
    }

    pub fn is_sortable(&self) -> bool {
        !matches!(
            self,
            BootcampField::Location | BootcampField::Careers | BootcampField::Courses
        )
    }
}

impl FromStr for BootcampField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BootcampField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::Invalid(format!("Unknown bootcamp field '{s}'")))
    }
}

impl fmt::Display for BootcampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Eq(FilterValue),
    Gt(FilterValue),
    Gte(FilterValue),
    Lt(FilterValue),
    Lte(FilterValue),
    In(Vec<FilterValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    pub field: BootcampField,
    pub comparison: Comparison,
}

/// Typed form of a [`FilterDocument`]. Every condition must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootcampFilter {
    pub conditions: Vec<FieldCondition>,
}

impl BootcampFilter {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl TryFrom<&FilterDocument> for BootcampFilter {
    type Error = CoreError;

    fn try_from(document: &FilterDocument) -> Result<Self, Self::Error> {
        let mut conditions = Vec::new();

        for (key, value) in document.iter() {
            let field: BootcampField = key.parse()?;
            let kind = field.filter_kind().ok_or_else(|| {
                CoreError::Invalid(format!("Field '{field}' cannot be used as a filter"))
            })?;

            match value {
                Value::Object(operators) => {
                    for (token, operand) in operators {
                        let operator = ComparisonOperator::from_token(token).ok_or_else(|| {
                            CoreError::Invalid(format!(
                                "Unknown operator '{token}' on field '{field}'"
                            ))
                        })?;
                        if !kind.supports(operator) {
                            return Err(CoreError::Invalid(format!(
                                "Operator '{}' is not supported on field '{field}'",
                                operator.keyword()
                            )));
                        }

                        let comparison = match operator {
                            ComparisonOperator::Gt => Comparison::Gt(parse_value(field, kind, operand)?),
                            ComparisonOperator::Gte => {
                                Comparison::Gte(parse_value(field, kind, operand)?)
                            }
                            ComparisonOperator::Lt => Comparison::Lt(parse_value(field, kind, operand)?),
                            ComparisonOperator::Lte => {
                                Comparison::Lte(parse_value(field, kind, operand)?)
                            }
                            ComparisonOperator::In => Comparison::In(parse_list(field, kind, operand)?),
                        };
                        conditions.push(FieldCondition { field, comparison });
                    }
                }
                literal => conditions.push(FieldCondition {
                    field,
                    comparison: Comparison::Eq(parse_value(field, kind, literal)?),
                }),
            }
        }

        Ok(Self { conditions })
    }
}

fn parse_value(field: BootcampField, kind: FieldKind, value: &Value) -> Result<FilterValue, CoreError> {
    let invalid = || CoreError::Invalid(format!("Invalid value {value} for field '{field}'"));

    let raw = match value {
        Value::String(raw) => raw.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return Err(invalid()),
    };

    match kind {
        FieldKind::Text | FieldKind::TextList => Ok(FilterValue::Text(raw)),
        FieldKind::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(FilterValue::Number)
            .ok_or_else(invalid),
        FieldKind::Bool => match raw.as_str() {
            "true" => Ok(FilterValue::Bool(true)),
            "false" => Ok(FilterValue::Bool(false)),
            _ => Err(invalid()),
        },
        FieldKind::Timestamp => DateTime::parse_from_rfc3339(raw.trim())
            .map(|timestamp| FilterValue::Timestamp(timestamp.with_timezone(&Utc)))
            .map_err(|_| invalid()),
    }
}

/// `in` accepts a repeated parameter or a comma separated value.
fn parse_list(field: BootcampField, kind: FieldKind, value: &Value) -> Result<Vec<FilterValue>, CoreError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| parse_value(field, kind, item))
            .collect(),
        Value::String(raw) => raw
            .split(',')
            .map(|part| parse_value(field, kind, &Value::String(part.trim().to_string())))
            .collect(),
        other => Ok(vec![parse_value(field, kind, other)?]),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootcampSortKey {
    pub field: BootcampField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootcampSort {
    pub keys: Vec<BootcampSortKey>,
}

impl TryFrom<&QueryPlan> for BootcampSort {
    type Error = CoreError;

    fn try_from(plan: &QueryPlan) -> Result<Self, Self::Error> {
        let keys = plan
            .sort_keys()
            .into_iter()
            .map(|key| {
                let field: BootcampField = key.field.parse()?;
                if !field.is_sortable() {
                    return Err(CoreError::Invalid(format!(
                        "Field '{field}' cannot be used for sorting"
                    )));
                }
                Ok(BootcampSortKey {
                    field,
                    direction: key.direction,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(Self { keys })
    }
}

/// Inclusion projection over serialized bootcamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootcampProjection {
    fields: Vec<String>,
}

impl BootcampProjection {
    pub fn apply(&self, document: Value) -> Value {
        translator::project(document, &self.fields)
    }
}

impl TryFrom<&QueryPlan> for BootcampProjection {
    type Error = CoreError;

    fn try_from(plan: &QueryPlan) -> Result<Self, Self::Error> {
        let fields = plan.selected_fields();
        for field in &fields {
            field.parse::<BootcampField>()?;
        }
        Ok(Self { fields })
    }
}

/// One page of a bootcamp listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootcampPage {
    pub pagination: Pagination,
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// First match returned by a geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub point: GeoPoint,
    pub formatted_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

pub struct RadiusSearchInput {
    pub zipcode: String,
    pub distance: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRadius {
    pub center: GeoPoint,
    pub distance_km: f64,
}

impl GeoRadius {
    /// Central angle covered by the radius on a sphere of [`EARTH_RADIUS_KM`].
    pub fn radians(&self) -> f64 {
        self.distance_km / EARTH_RADIUS_KM
    }
}

/// Distance in kilometers from a path segment.
pub fn parse_distance(raw: &str) -> Result<f64, CoreError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|distance| distance.is_finite() && *distance >= 0.0)
        .ok_or_else(|| CoreError::Invalid(format!("Invalid distance '{raw}'")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::query::value_objects::QueryParams;

    fn plan(pairs: &[(&str, &str)]) -> QueryPlan {
        let params: QueryParams = pairs.iter().copied().collect();
        QueryPlan::translate(&params)
    }

    fn nested_plan(path: &[&str], value: &str) -> QueryPlan {
        let mut params = QueryParams::new();
        params.insert_path(path, value.to_string());
        QueryPlan::translate(&params)
    }

    #[test]
    fn test_literal_filter_is_typed_by_field() {
        let plan = plan(&[("housing", "true"), ("location.state", "MA")]);
        let filter = BootcampFilter::try_from(&plan.filter).unwrap();

        assert_eq!(
            filter.conditions,
            vec![
                FieldCondition {
                    field: BootcampField::Housing,
                    comparison: Comparison::Eq(FilterValue::Bool(true)),
                },
                FieldCondition {
                    field: BootcampField::LocationState,
                    comparison: Comparison::Eq(FilterValue::Text("MA".to_string())),
                },
            ]
        );
    }

    #[test]
    fn test_range_filter_parses_numbers() {
        let mut params = QueryParams::new();
        params.insert_path(&["averageCost", "gte"], "1000".to_string());
        params.insert_path(&["averageCost", "lte"], "5000".to_string());
        let plan = QueryPlan::translate(&params);

        let filter = BootcampFilter::try_from(&plan.filter).unwrap();
        assert_eq!(
            filter.conditions,
            vec![
                FieldCondition {
                    field: BootcampField::AverageCost,
                    comparison: Comparison::Gte(FilterValue::Number(1000.0)),
                },
                FieldCondition {
                    field: BootcampField::AverageCost,
                    comparison: Comparison::Lte(FilterValue::Number(5000.0)),
                },
            ]
        );
    }

    #[test]
    fn test_in_filter_splits_commas() {
        let plan = nested_plan(&["careers", "in"], "Business, UI/UX");
        let filter = BootcampFilter::try_from(&plan.filter).unwrap();
        assert_eq!(
            filter.conditions[0].comparison,
            Comparison::In(vec![
                FilterValue::Text("Business".to_string()),
                FilterValue::Text("UI/UX".to_string()),
            ])
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let plan = plan(&[("password", "hunter2")]);
        let err = BootcampFilter::try_from(&plan.filter).unwrap_err();
        assert_eq!(
            err,
            CoreError::Invalid("Unknown bootcamp field 'password'".to_string())
        );
    }

    #[test]
    fn test_unsupported_operator_is_rejected() {
        let plan = nested_plan(&["name", "gt"], "M");
        assert!(matches!(
            BootcampFilter::try_from(&plan.filter),
            Err(CoreError::Invalid(_))
        ));

        let plan = nested_plan(&["averageCost", "regex"], "1");
        assert_eq!(
            BootcampFilter::try_from(&plan.filter).unwrap_err(),
            CoreError::Invalid("Unknown operator 'regex' on field 'averageCost'".to_string())
        );
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        let plan = nested_plan(&["averageRating", "gt"], "seven");
        assert!(BootcampFilter::try_from(&plan.filter).is_err());
    }

    #[test]
    fn test_timestamp_filter() {
        let plan = nested_plan(&["createdAt", "gte"], "2024-01-01T00:00:00Z");
        let filter = BootcampFilter::try_from(&plan.filter).unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            filter.conditions[0].comparison,
            Comparison::Gte(FilterValue::Timestamp(expected))
        );
    }

    #[test]
    fn test_sort_is_typed_and_validated() {
        let sort = BootcampSort::try_from(&plan(&[("sort", "-averageCost,name")])).unwrap();
        assert_eq!(
            sort.keys,
            vec![
                BootcampSortKey {
                    field: BootcampField::AverageCost,
                    direction: SortDirection::Desc,
                },
                BootcampSortKey {
                    field: BootcampField::Name,
                    direction: SortDirection::Asc,
                },
            ]
        );

        let default_sort = BootcampSort::try_from(&plan(&[])).unwrap();
        assert_eq!(default_sort.keys[0].field, BootcampField::CreatedAt);

        assert!(BootcampSort::try_from(&plan(&[("sort", "careers")])).is_err());
        assert!(BootcampSort::try_from(&plan(&[("sort", "-nope")])).is_err());
    }

    #[test]
    fn test_projection_validates_and_applies() {
        let projection = BootcampProjection::try_from(&plan(&[("select", "name,housing")])).unwrap();
        let projected = projection.apply(json!({
            "id": "1",
            "name": "Devworks",
            "housing": true,
            "description": "Full stack"
        }));
        assert_eq!(projected, json!({ "id": "1", "name": "Devworks", "housing": true }));

        assert!(BootcampProjection::try_from(&plan(&[("select", "name,secret")])).is_err());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in BootcampField::ALL {
            assert_eq!(field.as_str().parse::<BootcampField>().unwrap(), field);
        }
    }

    #[test]
    fn test_distance_parsing() {
        assert_eq!(parse_distance("10").unwrap(), 10.0);
        assert_eq!(parse_distance("2.5").unwrap(), 2.5);
        assert!(parse_distance("-1").is_err());
        assert!(parse_distance("far").is_err());
        assert!(parse_distance("NaN").is_err());
    }

    #[test]
    fn test_radius_in_radians() {
        let radius = GeoRadius {
            center: GeoPoint {
                latitude: 42.36,
                longitude: -71.06,
            },
            distance_km: 6378.0,
        };
        assert_eq!(radius.radians(), 1.0);
    }
}

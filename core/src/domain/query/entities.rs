use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::{translator, value_objects::QueryParams};

/// Keys consumed by the plan itself; they never reach the filter.
pub const RESERVED_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];
pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 25;
pub const DEFAULT_SORT: &str = "-createdAt";
/// Largest offset the storage layer can bind (a signed 64-bit `OFFSET`).
pub const MAX_SKIP: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 5] = [
        ComparisonOperator::Gt,
        ComparisonOperator::Gte,
        ComparisonOperator::Lt,
        ComparisonOperator::Lte,
        ComparisonOperator::In,
    ];

    /// Bare keyword as written in a query string.
    pub fn keyword(&self) -> &'static str {
        match self {
            ComparisonOperator::Gt => "gt",
            ComparisonOperator::Gte => "gte",
            ComparisonOperator::Lt => "lt",
            ComparisonOperator::Lte => "lte",
            ComparisonOperator::In => "in",
        }
    }

    /// Prefixed token understood by the storage layer.
    pub fn token(&self) -> &'static str {
        match self {
            ComparisonOperator::Gt => "$gt",
            ComparisonOperator::Gte => "$gte",
            ComparisonOperator::Lt => "$lt",
            ComparisonOperator::Lte => "$lte",
            ComparisonOperator::In => "$in",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }
}

/// Filter handed to the storage layer: field name mapped to a literal or to an
/// operator object such as `{ "$gte": "1000" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterDocument(Map<String, Value>);

impl FilterDocument {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageRef {
    pub page: u64,
    pub limit: u64,
}

/// Neighbouring pages of a result window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

impl Pagination {
    /// `next` exists while `page * limit < total`, `prev` once `(page - 1) * limit > 0`.
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let end_index = page.saturating_mul(limit);
        let skipped = page.saturating_sub(1).saturating_mul(limit);

        Self {
            next: (end_index < total).then_some(PageRef {
                page: page.saturating_add(1),
                limit,
            }),
            prev: (skipped > 0).then_some(PageRef {
                page: page - 1,
                limit,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// Everything the storage layer needs to run a list query.
///
/// The pagination descriptor is not part of the plan: it depends on the total
/// of records matching the typed filter, which is only known after counting.
/// [`QueryPlan::paginate`] completes the plan once that total is available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    pub filter: FilterDocument,
    /// Space separated inclusion list, `None` returns every field.
    pub projection: Option<String>,
    /// Space separated sort fields, `-` prefix for descending.
    pub sort: String,
    pub page: u64,
    pub skip: u64,
    pub limit: u64,
}

impl QueryPlan {
    pub fn translate(params: &QueryParams) -> Self {
        let page = translator::page_number(params.text("page"), DEFAULT_PAGE);
        let limit = translator::page_number(params.text("limit"), DEFAULT_LIMIT);

        Self {
            filter: translator::build_filter(params),
            projection: translator::build_projection(params),
            sort: translator::build_sort(params),
            page,
            skip: (page - 1)
                .checked_mul(limit)
                .map_or(MAX_SKIP, |skip| skip.min(MAX_SKIP)),
            limit,
        }
    }

    pub fn paginate(&self, total: u64) -> Pagination {
        Pagination::new(self.page, self.limit, total)
    }

    pub fn sort_keys(&self) -> Vec<SortKey> {
        self.sort
            .split_whitespace()
            .map(|part| match part.strip_prefix('-') {
                Some(field) => SortKey {
                    field: field.to_string(),
                    direction: SortDirection::Desc,
                },
                None => SortKey {
                    field: part.to_string(),
                    direction: SortDirection::Asc,
                },
            })
            .collect()
    }

    pub fn selected_fields(&self) -> Vec<String> {
        self.projection
            .as_deref()
            .map(|projection| projection.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }
}

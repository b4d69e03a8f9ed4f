use axum::{extract::FromRequestParts, http::request::Parts};
use devcamper_core::domain::query::value_objects::QueryParams;

use super::{query_params::from_query_pairs, server::api_entities::api_error::ApiError};

/// Extractor for list query strings with bracket notation and repeated keys.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(
///     QueryParamsExtractor(query_params): QueryParamsExtractor,
/// ) -> Result<Response<T>, ApiError> {
///     let plan = QueryPlan::translate(&query_params);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QueryParamsExtractor(pub QueryParams);

impl<S> FromRequestParts<S> for QueryParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query_string)
            .map_err(|e| ApiError::BadRequest(format!("Malformed query string: {e}")))?;

        Ok(QueryParamsExtractor(from_query_pairs(pairs)))
    }
}

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

use super::{
    entities::{DEFAULT_SORT, FilterDocument, RESERVED_KEYS},
    value_objects::QueryParams,
};

/// Bare operator keywords in key position of the serialized filter.
static OPERATOR_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(gt|gte|lt|lte|in)":"#).expect("operator key pattern is valid")
});

/// Builds the filter document from every non-reserved parameter.
///
/// The parameters are serialized to JSON and every operator keyword used as an
/// object key is rewritten to its prefixed token, so `{"averageCost":{"gte":"1000"}}`
/// becomes `{"averageCost":{"$gte":"1000"}}`. All occurrences are rewritten, not
/// only the first one. Values are never touched: quotes inside string values are
/// escaped and cannot match the key pattern.
pub fn build_filter(params: &QueryParams) -> FilterDocument {
    let remaining = params.without(&RESERVED_KEYS);

    let serialized = match serde_json::to_string(&remaining) {
        Ok(serialized) => serialized,
        Err(e) => {
            warn!("Failed to serialize query filter: {}", e);
            return FilterDocument::default();
        }
    };

    let rewritten = OPERATOR_KEY.replace_all(&serialized, "\"$$${1}\":");

    serde_json::from_str::<Map<String, Value>>(&rewritten)
        .map(FilterDocument::new)
        .unwrap_or_else(|e| {
            warn!("Failed to read back query filter: {}", e);
            FilterDocument::default()
        })
}

/// `select=a,b,c` -> `"a b c"`.
pub fn build_projection(params: &QueryParams) -> Option<String> {
    params
        .text("select")
        .filter(|select| !select.is_empty())
        .map(|select| comma_list_to_spaces(&select))
}

/// `sort=-name,age` -> `"-name age"`, newest first when absent.
pub fn build_sort(params: &QueryParams) -> String {
    params
        .text("sort")
        .filter(|sort| !sort.is_empty())
        .map(|sort| comma_list_to_spaces(&sort))
        .unwrap_or_else(|| DEFAULT_SORT.to_string())
}

fn comma_list_to_spaces(list: &str) -> String {
    list.split(',').collect::<Vec<_>>().join(" ")
}

/// Reads a page number or size. Leading digits are honoured (`"2abc"` is 2);
/// missing, unparseable and non-positive input falls back to `default`.
pub fn page_number(raw: Option<String>, default: u64) -> u64 {
    raw.as_deref()
        .and_then(parse_leading_integer)
        .filter(|n| *n >= 1)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(default)
}

fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Keeps only the selected fields of a serialized record. Dotted paths select
/// nested fields and `id` is always kept.
pub fn project(document: Value, fields: &[String]) -> Value {
    if fields.is_empty() {
        return document;
    }
    let Value::Object(source) = document else {
        return document;
    };

    let mut projected = Map::new();
    if let Some(id) = source.get("id") {
        projected.insert("id".to_string(), id.clone());
    }
    for field in fields {
        let path: Vec<&str> = field.split('.').collect();
        copy_path(&source, &mut projected, &path);
    }

    Value::Object(projected)
}

fn copy_path(source: &Map<String, Value>, target: &mut Map<String, Value>, path: &[&str]) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    let Some(value) = source.get(*head) else {
        return;
    };

    if rest.is_empty() {
        target.insert(head.to_string(), value.clone());
        return;
    }

    if let Value::Object(inner_source) = value {
        let entry = target
            .entry(head.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(inner_target) = entry {
            copy_path(inner_source, inner_target, rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::query::entities::{
        MAX_SKIP, PageRef, Pagination, QueryPlan, SortDirection,
    };

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_pagination_neighbours_follow_totals() {
        for page in 1..=6u64 {
            for limit in 1..=6u64 {
                for total in 0..=40u64 {
                    let pagination = Pagination::new(page, limit, total);
                    assert_eq!(pagination.next.is_some(), page * limit < total);
                    assert_eq!(pagination.prev.is_some(), (page - 1) * limit > 0);
                    if let Some(next) = pagination.next {
                        assert_eq!(next, PageRef { page: page + 1, limit });
                    }
                    if let Some(prev) = pagination.prev {
                        assert_eq!(prev, PageRef { page: page - 1, limit });
                    }
                }
            }
        }
    }

    #[test]
    fn test_defaults_without_page_and_limit() {
        let plan = QueryPlan::translate(&QueryParams::new());
        assert_eq!(plan.page, 1);
        assert_eq!(plan.limit, 25);
        assert_eq!(plan.skip, 0);
        assert_eq!(plan.projection, None);
        assert!(plan.filter.is_empty());
    }

    #[test]
    fn test_unparseable_page_and_limit_fall_back() {
        let plan = QueryPlan::translate(&params(&[("page", "abc"), ("limit", "0")]));
        assert_eq!((plan.page, plan.limit), (1, 25));

        let plan = QueryPlan::translate(&params(&[("page", "-3"), ("limit", "")]));
        assert_eq!((plan.page, plan.limit), (1, 25));
    }

    #[test]
    fn test_page_uses_leading_digits() {
        let plan = QueryPlan::translate(&params(&[("page", "3rd"), ("limit", " 7 ")]));
        assert_eq!(plan.page, 3);
        assert_eq!(plan.limit, 7);
        assert_eq!(plan.skip, 14);
    }

    #[test]
    fn test_select_becomes_space_separated_projection() {
        let plan = QueryPlan::translate(&params(&[("select", "a,b,c")]));
        assert_eq!(plan.projection.as_deref(), Some("a b c"));
        assert_eq!(plan.selected_fields(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_select_returns_all_fields() {
        let plan = QueryPlan::translate(&params(&[("select", "")]));
        assert_eq!(plan.projection, None);
    }

    #[test]
    fn test_sort_keeps_descending_prefix() {
        let plan = QueryPlan::translate(&params(&[("sort", "-name,age")]));
        assert_eq!(plan.sort, "-name age");

        let keys = plan.sort_keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].field, "name");
        assert_eq!(keys[0].direction, SortDirection::Desc);
        assert_eq!(keys[1].field, "age");
        assert_eq!(keys[1].direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_defaults_to_newest_first() {
        let plan = QueryPlan::translate(&QueryParams::new());
        assert_eq!(plan.sort, "-createdAt");
    }

    #[test]
    fn test_operator_is_prefixed_and_reserved_keys_removed() {
        let mut query = params(&[
            ("select", "name"),
            ("sort", "name"),
            ("page", "2"),
            ("limit", "5"),
        ]);
        query.insert_path(&["averageCost", "gte"], "1000".to_string());

        let filter = build_filter(&query);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({ "averageCost": { "$gte": "1000" } })
        );
        for key in RESERVED_KEYS {
            assert!(filter.get(key).is_none());
        }
    }

    #[test]
    fn test_every_operator_occurrence_is_rewritten() {
        let mut query = QueryParams::new();
        query.insert_path(&["averageCost", "gte"], "1000".to_string());
        query.insert_path(&["averageCost", "lte"], "5000".to_string());
        query.insert_path(&["averageRating", "gt"], "7".to_string());

        let filter = build_filter(&query);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "averageCost": { "$gte": "1000", "$lte": "5000" },
                "averageRating": { "$gt": "7" }
            })
        );
    }

    #[test]
    fn test_operator_keyword_in_value_is_untouched() {
        let mut query = params(&[("name", "in"), ("slug", "\"gt\":")]);
        query.insert_path(&["careers", "in"], "Business".to_string());

        let filter = build_filter(&query);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "name": "in",
                "slug": "\"gt\":",
                "careers": { "$in": "Business" }
            })
        );
    }

    #[test]
    fn test_repeated_operator_values_become_array() {
        let mut query = QueryParams::new();
        query.insert_path(&["careers", "in"], "Business".to_string());
        query.insert_path(&["careers", "in"], "UI/UX".to_string());

        let filter = build_filter(&query);
        assert_eq!(
            filter.get("careers"),
            Some(&json!({ "$in": ["Business", "UI/UX"] }))
        );
    }

    #[test]
    fn test_end_to_end_second_page() {
        let plan = QueryPlan::translate(&params(&[
            ("select", "name,housing"),
            ("sort", "name"),
            ("page", "2"),
            ("limit", "10"),
        ]));

        assert_eq!(plan.projection.as_deref(), Some("name housing"));
        assert_eq!(plan.sort, "name");
        assert_eq!(plan.skip, 10);
        assert_eq!(plan.limit, 10);
        assert_eq!(
            plan.paginate(25),
            Pagination {
                next: Some(PageRef { page: 3, limit: 10 }),
                prev: Some(PageRef { page: 1, limit: 10 }),
            }
        );
        assert_eq!(
            serde_json::to_value(plan.paginate(25)).unwrap(),
            json!({ "next": { "page": 3, "limit": 10 }, "prev": { "page": 1, "limit": 10 } })
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let plan = QueryPlan::translate(&params(&[("page", "2"), ("limit", "10")]));

        assert_eq!(
            serde_json::to_value(plan.paginate(20)).unwrap(),
            json!({ "prev": { "page": 1, "limit": 10 } })
        );
    }

    #[test]
    fn test_huge_page_keeps_skip_bindable() {
        let plan = QueryPlan::translate(&params(&[("page", "9223372036854775807")]));
        assert_eq!(plan.page, i64::MAX as u64);
        assert_eq!(plan.skip, MAX_SKIP);
        assert!(i64::try_from(plan.skip).is_ok());

        let plan = QueryPlan::translate(&params(&[
            ("page", "400000000000000000"),
            ("limit", "25"),
        ]));
        assert_eq!(plan.skip, MAX_SKIP);

        let plan = QueryPlan::translate(&params(&[
            ("page", "9223372036854775807"),
            ("limit", "9223372036854775807"),
        ]));
        assert_eq!(plan.skip, MAX_SKIP);
        assert_eq!(
            plan.paginate(10).prev,
            Some(PageRef { page: i64::MAX as u64 - 1, limit: i64::MAX as u64 })
        );
    }

    #[test]
    fn test_project_keeps_id_and_nested_paths() {
        let document = json!({
            "id": "0190",
            "name": "Devworks",
            "housing": true,
            "location": { "city": "Boston", "state": "MA" }
        });
        let projected = project(
            document,
            &["name".to_string(), "location.city".to_string()],
        );
        assert_eq!(
            projected,
            json!({ "id": "0190", "name": "Devworks", "location": { "city": "Boston" } })
        );
    }

    #[test]
    fn test_project_without_fields_is_identity() {
        let document = json!({ "id": "1", "name": "Devworks" });
        assert_eq!(project(document.clone(), &[]), document);
    }
}

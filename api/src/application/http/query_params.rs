use devcamper_core::domain::query::value_objects::QueryParams;

/// Splits a bracketed query key into its path: `averageCost[gte]` -> `["averageCost", "gte"]`.
///
/// Keys without well-formed brackets are kept whole.
pub fn parse_key(key: &str) -> Vec<String> {
    let Some(open) = key.find('[') else {
        return vec![key.to_string()];
    };
    if open == 0 {
        return vec![key.to_string()];
    }

    let mut path = vec![key[..open].to_string()];
    let mut rest = &key[open..];

    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return vec![key.to_string()];
        };
        let Some(close) = inner.find(']') else {
            return vec![key.to_string()];
        };
        let segment = &inner[..close];
        if segment.is_empty() {
            return vec![key.to_string()];
        }
        path.push(segment.to_string());
        rest = &inner[close + 1..];
    }

    path
}

/// Builds [`QueryParams`] from decoded query pairs, keeping repeated keys.
pub fn from_query_pairs<I>(pairs: I) -> QueryParams
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut params = QueryParams::new();
    for (key, value) in pairs {
        params.insert_path(&parse_key(&key), value);
    }
    params
}

#[cfg(test)]
mod tests {
    use devcamper_core::domain::query::value_objects::QueryValue;

    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_plain_key() {
        assert_eq!(parse_key("housing"), vec!["housing"]);
        assert_eq!(parse_key("location.city"), vec!["location.city"]);
    }

    #[test]
    fn test_parse_bracket_key() {
        assert_eq!(parse_key("averageCost[gte]"), vec!["averageCost", "gte"]);
        assert_eq!(parse_key("a[b][c]"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_malformed_brackets_are_kept_whole() {
        assert_eq!(parse_key("averageCost[gte"), vec!["averageCost[gte"]);
        assert_eq!(parse_key("[gte]"), vec!["[gte]"]);
        assert_eq!(parse_key("cost[]"), vec!["cost[]"]);
        assert_eq!(parse_key("cost[gte]x"), vec!["cost[gte]x"]);
    }

    #[test]
    fn test_pairs_build_nested_params() {
        let params = from_query_pairs(pairs(&[
            ("averageCost[gte]", "1000"),
            ("averageCost[lte]", "5000"),
            ("select", "name"),
        ]));

        match params.get("averageCost") {
            Some(QueryValue::Nested(operators)) => {
                assert_eq!(operators.len(), 2);
                assert_eq!(
                    operators.get("gte"),
                    Some(&QueryValue::Text("1000".to_string()))
                );
            }
            other => panic!("expected nested value, got {other:?}"),
        }
        assert_eq!(params.text("select").as_deref(), Some("name"));
    }

    #[test]
    fn test_repeated_keys_become_lists() {
        let params = from_query_pairs(pairs(&[("careers[in]", "Business"), ("careers[in]", "UI/UX")]));

        match params.get("careers") {
            Some(QueryValue::Nested(operators)) => assert_eq!(
                operators.get("in"),
                Some(&QueryValue::List(vec![
                    "Business".to_string(),
                    "UI/UX".to_string()
                ]))
            ),
            other => panic!("expected nested value, got {other:?}"),
        }
    }
}

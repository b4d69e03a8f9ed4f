use std::collections::BTreeMap;

use serde::Serialize;

/// Raw value of a single query-string parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// `name=value`
    Text(String),
    /// `name=a&name=b`
    List(Vec<String>),
    /// `name[key]=value`
    Nested(BTreeMap<String, QueryValue>),
}

impl QueryValue {
    /// Flattened textual form. Repeated values are joined with commas, nested maps have none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            QueryValue::Text(value) => Some(value.clone()),
            QueryValue::List(values) => Some(values.join(",")),
            QueryValue::Nested(_) => None,
        }
    }

    fn push(&mut self, value: String) {
        match self {
            QueryValue::Text(existing) => {
                let first = std::mem::take(existing);
                *self = QueryValue::List(vec![first, value]);
            }
            QueryValue::List(values) => values.push(value),
            // a nested map keeps precedence over a plain value under the same key
            QueryValue::Nested(_) => {}
        }
    }
}

/// Query parameters of one request, keyed by parameter name.
///
/// Bracketed keys are stored as nested maps so that `averageCost[gte]=1000`
/// reads as `{ "averageCost": { "gte": "1000" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Textual value of a top-level parameter, see [`QueryValue::as_text`].
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(QueryValue::as_text)
    }

    /// Inserts a plain `key=value` pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key: String = key.into();
        self.insert_path(&[key], value.into());
    }

    /// Inserts a value under a bracket path, `["averageCost", "gte"]` for `averageCost[gte]`.
    /// Repeating a path turns its value into a list.
    pub fn insert_path<S: AsRef<str>>(&mut self, path: &[S], value: String) {
        insert_into(&mut self.0, path, value);
    }

    /// Copy of the parameters without the given keys.
    pub fn without(&self, keys: &[&str]) -> BTreeMap<String, QueryValue> {
        self.0
            .iter()
            .filter(|(key, _)| !keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

fn insert_into<S: AsRef<str>>(map: &mut BTreeMap<String, QueryValue>, path: &[S], value: String) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    let key = head.as_ref().to_string();

    if rest.is_empty() {
        match map.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                map.insert(key, QueryValue::Text(value));
            }
        }
        return;
    }

    let entry = map
        .entry(key)
        .or_insert_with(|| QueryValue::Nested(BTreeMap::new()));
    if !matches!(entry, QueryValue::Nested(_)) {
        *entry = QueryValue::Nested(BTreeMap::new());
    }
    if let QueryValue::Nested(inner) = entry {
        insert_into(inner, rest, value);
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_key_becomes_list() {
        let params: QueryParams = [("careers", "Business"), ("careers", "UI/UX")]
            .into_iter()
            .collect();
        assert_eq!(
            params.get("careers"),
            Some(&QueryValue::List(vec![
                "Business".to_string(),
                "UI/UX".to_string()
            ]))
        );
        assert_eq!(params.text("careers").as_deref(), Some("Business,UI/UX"));
    }

    #[test]
    fn test_insert_path_builds_nested_map() {
        let mut params = QueryParams::new();
        params.insert_path(&["averageCost", "gte"], "1000".to_string());
        params.insert_path(&["averageCost", "lte"], "5000".to_string());

        let Some(QueryValue::Nested(inner)) = params.get("averageCost") else {
            panic!("expected nested value");
        };
        assert_eq!(inner.get("gte"), Some(&QueryValue::Text("1000".to_string())));
        assert_eq!(inner.get("lte"), Some(&QueryValue::Text("5000".to_string())));
        assert_eq!(params.text("averageCost"), None);
    }

    #[test]
    fn test_nested_value_wins_over_plain_value() {
        let mut params = QueryParams::new();
        params.insert("housing", "true");
        params.insert_path(&["housing", "in"], "false".to_string());
        params.insert("housing", "true");

        assert!(matches!(params.get("housing"), Some(QueryValue::Nested(_))));
    }

    #[test]
    fn test_without_drops_keys() {
        let params: QueryParams = [("select", "name"), ("housing", "true")]
            .into_iter()
            .collect();
        let remaining = params.without(&["select"]);
        assert_eq!(remaining.len(), 1);
        assert!(remaining.contains_key("housing"));
    }
}

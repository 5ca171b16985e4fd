//! Document model and the query shape shared by every store
//!
//! Stores only have to list a collection in insertion order. Filtering,
//! ordering, cursors and limits are evaluated here so the memory and SQLite
//! backends page identically.
//!
//! Pagination is best-effort. A cursor records the last document's order value
//! and id; documents written between two page fetches may be skipped or shown
//! twice.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Field map of a stored document
pub type Fields = Map<String, Value>;

/// A stored document: id plus a JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Field value, `None` when missing
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Field as a non-empty string
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Field as a number; numeric strings are accepted
    pub fn f64_field(&self, name: &str) -> Option<f64> {
        match self.field(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .filter(|n| n.is_finite())
    }

    pub fn u64_field(&self, name: &str) -> Option<u64> {
        match self.field(name)? {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.field(name).and_then(Value::as_bool)
    }

    /// Field as a list of strings, non-strings dropped
    pub fn strings_field(&self, name: &str) -> Vec<String> {
        match self.field(name) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// A predicate on one field
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the value
    Eq(String, Value),
    /// Field is an array containing the value
    ArrayContains(String, Value),
    /// Trimmed text field equals the value, ignoring case
    EqIgnoreCase(String, String),
}

impl Filter {
    fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::Eq(field, value) => doc.field(field) == Some(value),
            Filter::ArrayContains(field, value) => match doc.field(field) {
                Some(Value::Array(items)) => items.contains(value),
                _ => false,
            },
            Filter::EqIgnoreCase(field, value) => doc
                .str_field(field)
                .map_or(false, |text| text.to_lowercase() == value.to_lowercase()),
        }
    }
}

/// Position after which the next page starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Order-by value of the last document on the previous page
    pub value: Value,
    /// Id of that document
    pub id: String,
}

/// One page of query results
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub documents: Vec<Document>,
    /// Set when `has_more` is true
    pub cursor: Option<Cursor>,
    pub has_more: bool,
}

/// A collection query
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
    pub start_after: Option<Cursor>,
}

impl Query {
    /// Query every document in a collection
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
            limit: None,
            start_after: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.into(), value.into()));
        self
    }

    pub fn where_eq_ignore_case(
        mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters
            .push(Filter::EqIgnoreCase(field.into(), value.into()));
        self
    }

    pub fn where_contains(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters
            .push(Filter::ArrayContains(field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn start_after(mut self, cursor: Option<Cursor>) -> Self {
        self.start_after = cursor;
        self
    }

    /// Cursor pointing just past `doc` under this query's ordering
    pub fn cursor_for(&self, doc: &Document) -> Cursor {
        let value = self
            .order_by
            .as_ref()
            .and_then(|(field, _)| doc.field(field).cloned())
            .unwrap_or(Value::Null);
        Cursor {
            value,
            id: doc.id.clone(),
        }
    }

    /// Evaluate the query over a collection listed in insertion order
    pub fn apply(&self, documents: Vec<Document>) -> Page {
        let mut docs: Vec<Document> = documents
            .into_iter()
            .filter(|doc| self.filters.iter().all(|f| f.matches(doc)))
            .collect();

        if self.order_by.is_some() {
            docs.sort_by(|a, b| {
                let (va, vb) = (self.sort_value(a), self.sort_value(b));
                self.compare(va, &a.id, vb, &b.id)
            });
        }

        if let Some(cursor) = &self.start_after {
            match &self.order_by {
                Some(_) => docs.retain(|doc| {
                    self.compare(self.sort_value(doc), &doc.id, &cursor.value, &cursor.id)
                        == Ordering::Greater
                }),
                // Unordered queries page in insertion order
                None => {
                    if let Some(pos) = docs.iter().position(|d| d.id == cursor.id) {
                        docs.drain(..=pos);
                    }
                }
            }
        }

        let has_more = self.limit.is_some_and(|limit| docs.len() > limit);
        if let Some(limit) = self.limit {
            docs.truncate(limit);
        }

        let cursor = if has_more {
            docs.last().map(|doc| self.cursor_for(doc))
        } else {
            None
        };

        Page {
            documents: docs,
            cursor,
            has_more,
        }
    }

    fn sort_value<'a>(&self, doc: &'a Document) -> &'a Value {
        static NULL: Value = Value::Null;
        self.order_by
            .as_ref()
            .and_then(|(field, _)| doc.field(field))
            .unwrap_or(&NULL)
    }

    fn compare(&self, va: &Value, ida: &str, vb: &Value, idb: &str) -> Ordering {
        let ordering = compare_values(va, vb).then_with(|| ida.cmp(idb));
        match self.order_by {
            Some((_, Direction::Descending)) => ordering.reverse(),
            _ => ordering,
        }
    }
}

/// Total order over JSON values: null < bool < number < string < array < object
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(l, r)| compare_values(l, r))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, data: Value) -> Document {
        match data {
            Value::Object(map) => Document::new(id, map),
            _ => panic!("test documents must be objects"),
        }
    }

    fn ids(page: &Page) -> Vec<&str> {
        page.documents.iter().map(|d| d.id.as_str()).collect()
    }

    fn bounties() -> Vec<Document> {
        vec![
            doc("b1", json!({"status": "open", "reward": 50})),
            doc("b2", json!({"status": "closed", "reward": 500})),
            doc("b3", json!({"status": "open", "reward": 250})),
            doc("b4", json!({"status": "open", "reward": 250})),
            doc("b5", json!({"status": "open"})),
        ]
    }

    #[test]
    fn test_filter_and_order_descending() {
        let page = Query::collection("bounties")
            .where_eq("status", "open")
            .order_by("reward", Direction::Descending)
            .apply(bounties());

        // Equal rewards tie-break on id, reversed with the direction
        assert_eq!(ids(&page), vec!["b4", "b3", "b1", "b5"]);
        assert!(!page.has_more);
        assert!(page.cursor.is_none());
    }

    #[test]
    fn test_paging_visits_each_document_once() {
        let base = Query::collection("bounties")
            .order_by("reward", Direction::Descending)
            .limit(2);

        let first = base.clone().apply(bounties());
        assert_eq!(ids(&first), vec!["b2", "b4"]);
        assert!(first.has_more);

        let second = base.clone().start_after(first.cursor).apply(bounties());
        assert_eq!(ids(&second), vec!["b3", "b1"]);
        assert!(second.has_more);

        let third = base.start_after(second.cursor).apply(bounties());
        assert_eq!(ids(&third), vec!["b5"]);
        assert!(!third.has_more);
    }

    #[test]
    fn test_exact_page_has_no_more() {
        let page = Query::collection("bounties").limit(5).apply(bounties());
        assert_eq!(page.documents.len(), 5);
        assert!(!page.has_more);
    }

    #[test]
    fn test_unordered_cursor_uses_insertion_order() {
        let first = Query::collection("bounties").limit(3).apply(bounties());
        assert_eq!(ids(&first), vec!["b1", "b2", "b3"]);

        let rest = Query::collection("bounties")
            .start_after(first.cursor)
            .apply(bounties());
        assert_eq!(ids(&rest), vec!["b4", "b5"]);
    }

    #[test]
    fn test_array_contains() {
        let docs = vec![
            doc("a", json!({"skills": ["audit", "design"]})),
            doc("b", json!({"skills": ["trading"]})),
            doc("c", json!({"skills": "design"})),
        ];
        let page = Query::collection("agents")
            .where_contains("skills", "design")
            .apply(docs);
        assert_eq!(ids(&page), vec!["a"]);
    }

    #[test]
    fn test_eq_ignore_case_trims_text() {
        let docs = vec![
            doc("a", json!({"status": "open"})),
            doc("b", json!({"status": " Open "})),
            doc("c", json!({"status": "closed"})),
            doc("d", json!({"status": 1})),
        ];
        let page = Query::collection("bounties")
            .where_eq_ignore_case("status", "OPEN")
            .apply(docs);
        assert_eq!(ids(&page), vec!["a", "b"]);
    }

    #[test]
    fn test_field_fallbacks() {
        let d = doc(
            "x",
            json!({"name": "  ", "amount": "12.5", "count": 3.0, "tags": ["a", 1, "b"]}),
        );
        assert_eq!(d.str_field("name"), None);
        assert_eq!(d.f64_field("amount"), Some(12.5));
        assert_eq!(d.u64_field("count"), Some(3));
        assert_eq!(d.strings_field("tags"), vec!["a", "b"]);
        assert_eq!(d.bool_field("missing"), None);
    }

    #[test]
    fn test_compare_values_ranks_types() {
        assert_eq!(compare_values(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!(99), &json!("1")), Ordering::Less);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
    }
}

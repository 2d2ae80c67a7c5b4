use super::CellValue;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

type JsonMap = serde_json::Map<String, serde_json::Value>;

/// A mapping from field name to value.
///
/// Missing fields read as [`CellValue::Null`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "JsonMap", into = "JsonMap")]
pub struct Row {
    fields: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// A row with every listed field set to the empty string.
    pub fn blank<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields
            .into_iter()
            .map(|field| (field.to_string(), CellValue::from("")))
            .collect()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// Value of `field`, `Null` when absent.
    pub fn value(&self, field: &str) -> CellValue {
        self.get(field).cloned().unwrap_or_default()
    }

    /// Write a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Option<CellValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// At least one field holds a non-blank value.
    pub fn is_filled(&self) -> bool {
        self.fields.values().any(|v| !v.is_blank())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(JsonMap::from(self.clone()))
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<JsonMap> for Row {
    fn from(map: JsonMap) -> Self {
        Self {
            fields: map
                .iter()
                .map(|(k, v)| (k.clone(), CellValue::from_json(v)))
                .collect(),
        }
    }
}

impl From<Row> for JsonMap {
    fn from(row: Row) -> Self {
        row.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

/// Shared handle to a caller-owned row.
///
/// The grid never copies rows: it re-orders and filters handles. Editors write
/// through the same handle, so every holder observes the edit. Identity
/// (`ptr_eq`) is what "the same row" means for deletion and auto-add-row.
#[derive(Debug, Default)]
pub struct RowHandle(Rc<RefCell<Row>>);

impl RowHandle {
    pub fn new(row: Row) -> Self {
        Self(Rc::new(RefCell::new(row)))
    }

    pub fn ptr_eq(&self, other: &RowHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn borrow(&self) -> Ref<'_, Row> {
        self.0.borrow()
    }

    /// Value of `field`, `Null` when absent.
    pub fn value(&self, field: &str) -> CellValue {
        self.0.borrow().value(field)
    }

    /// Write a single field in place.
    pub fn set(&self, field: impl Into<String>, value: impl Into<CellValue>) -> Option<CellValue> {
        self.0.borrow_mut().set(field, value)
    }

    /// Mutate the row in place.
    pub fn update<R>(&self, f: impl FnOnce(&mut Row) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Detached copy of the current contents.
    pub fn snapshot(&self) -> Row {
        self.0.borrow().clone()
    }
}

impl Clone for RowHandle {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl From<Row> for RowHandle {
    fn from(row: Row) -> Self {
        Self::new(row)
    }
}

/// What `delete_row` should remove.
#[derive(Debug, Clone)]
pub enum RowTarget {
    /// The row behind this exact handle.
    Handle(RowHandle),
    /// The first row whose key field equals this value.
    Key(CellValue),
    /// The first row whose contents equal this row (used when identity is lost
    /// crossing the JS boundary).
    Matching(Row),
}

impl RowTarget {
    pub fn matches(&self, candidate: &RowHandle, key_field: &str) -> bool {
        match self {
            Self::Handle(handle) => handle.ptr_eq(candidate),
            Self::Key(CellValue::Null) => false,
            Self::Key(key) => candidate.borrow().get(key_field) == Some(key),
            Self::Matching(row) => *candidate.borrow() == *row,
        }
    }
}

impl From<RowHandle> for RowTarget {
    fn from(handle: RowHandle) -> Self {
        Self::Handle(handle)
    }
}

impl From<&RowHandle> for RowTarget {
    fn from(handle: &RowHandle) -> Self {
        Self::Handle(handle.clone())
    }
}

impl From<CellValue> for RowTarget {
    fn from(key: CellValue) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for RowTarget {
    fn from(key: &str) -> Self {
        Self::Key(key.into())
    }
}

impl From<i32> for RowTarget {
    fn from(key: i32) -> Self {
        Self::Key(key.into())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_edits_are_shared() {
        let a = RowHandle::new(Row::new().with("name", "x"));
        let b = a.clone();
        b.set("name", "y");
        assert_eq!(a.value("name"), CellValue::from("y"));
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_equal_contents_are_not_identical() {
        let a = RowHandle::new(Row::new().with("id", 1));
        let b = RowHandle::new(Row::new().with("id", 1));
        assert!(!a.ptr_eq(&b));
        assert!(RowTarget::Matching(a.snapshot()).matches(&b, "id"));
        assert!(!RowTarget::Handle(a).matches(&b, "id"));
    }

    #[test]
    fn test_row_json_round_trip_keeps_nested_as_text() {
        let json = serde_json::json!({"id": 1, "tags": ["a"], "name": null});
        let row: Row = serde_json::from_value(json).unwrap();
        assert_eq!(row.value("id"), CellValue::from(1));
        assert_eq!(row.value("tags"), CellValue::from(r#"["a"]"#));
        assert!(row.value("name").is_blank());
        assert!(row.value("missing").is_blank());
    }
}

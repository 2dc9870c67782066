use serde_json::Value;
use uuid::Uuid;

/// Equality filter on a top-level document field.
///
/// The store supports nothing but conjunctions of these; ranges and joins are
/// done client-side.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Matches a UUID field using its hyphenated document form
    pub fn uuid(field: impl Into<String>, id: Uuid) -> Self {
        Self::eq(field, Value::String(id.to_string()))
    }

    pub fn boolean(field: impl Into<String>, value: bool) -> Self {
        Self::eq(field, Value::Bool(value))
    }

    /// Returns true if `document` carries `field` with exactly `value`
    pub fn matches(&self, document: &Value) -> bool {
        document.get(&self.field) == Some(&self.value)
    }
}

use serde_json::{Map, Value};

/// A schema-free record as held by the document store.
pub type Document = Map<String, Value>;

/// Key under which a store-assigned identifier is exposed to clients.
pub const ID_FIELD: &str = "_id";

/// Keep only `fields` (plus the identifier) from `doc`.
///
/// Fields requested but absent from the document are simply left out, the
/// same way a document-store projection behaves.
pub fn project(doc: Document, fields: &[&str]) -> Document {
    doc.into_iter()
        .filter(|(key, _)| key == ID_FIELD || fields.contains(&key.as_str()))
        .collect()
}

/// Attach the identifier to a stored body for the response.
pub fn with_id(mut doc: Document, id: impl ToString) -> Document {
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    doc
}

/// True when `doc` has a string `field` equal to `expected`.
pub fn field_equals(doc: &Document, field: &str, expected: &str) -> bool {
    doc.get(field).and_then(Value::as_str) == Some(expected)
}

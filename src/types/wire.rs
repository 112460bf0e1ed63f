//! Field access over JSON objects with "set and not null" semantics.

use serde_json::{Map, Value as Json};

use super::RulesetError;

/// Borrow `json` as an object, or fail naming what was expected.
pub(crate) fn object<'a>(
    json: &'a Json,
    what: &'static str,
) -> Result<&'a Map<String, Json>, RulesetError> {
    json.as_object()
        .ok_or(RulesetError::NotAnObject { what })
}

/// A field counts as present only when it exists and is not `null`.
pub(crate) fn field<'a>(obj: &'a Map<String, Json>, name: &str) -> Option<&'a Json> {
    obj.get(name).filter(|v| !v.is_null())
}

pub(crate) fn string_field<'a>(
    obj: &'a Map<String, Json>,
    name: &'static str,
) -> Result<Option<&'a str>, RulesetError> {
    match field(obj, name) {
        None => Ok(None),
        Some(Json::String(s)) => Ok(Some(s)),
        Some(_) => Err(RulesetError::InvalidField {
            field: name,
            expected: "a string",
        }),
    }
}

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{error::ServiceError, logger::warn};

/// Identifier type id of ISBN entries in the `identifiers` list of an instance.
pub const TYPE_ID_ISBN: &str = "8261054f-be78-422d-bd51-4ed9f33c3422";
/// Identifier type id of ISSN entries in the `identifiers` list of an instance.
pub const TYPE_ID_ISSN: &str = "913300b2-03ed-469a-8179-c1092c991227";

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The parts of a FOLIO instance record which are used to build a [`Record`](crate::Record).
#[derive(Debug, Deserialize)]
pub struct Instance {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifiers: Vec<Identifier>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributors: Vec<Contributor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publication: Vec<Publication>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub editions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifier_type_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct Contributor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_of_publication: String,
}

impl TryFrom<&Value> for Instance {
    type Error = ServiceError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Instance::deserialize(value).map_err(|err| {
            ServiceError::UnexpectedData(format!("instance record has an unexpected format: {err}"))
        })
    }
}

/// Extract the instance record from a response body.
///
/// FOLIO returns either the instance record itself (for lookups by instance id), or an
/// envelope with a `totalRecords` count and an `instances` list (for searches). Returns
/// `Ok(None)` if the envelope contains no records. If there is more than one record, only the
/// first is used.
pub fn select_instance(value: Value, source: &str) -> Result<Option<Value>, ServiceError> {
    let Value::Object(mut object) = value else {
        return Err(ServiceError::UnexpectedData(format!(
            "expected a JSON object from '{source}'"
        )));
    };

    let total = object.get("totalRecords").map(Value::as_u64);
    match total {
        None if object.contains_key("title") => Ok(Some(Value::Object(object))),
        None => Err(ServiceError::UnexpectedData(format!(
            "response from '{source}' is neither an instance nor a list of instances"
        ))),
        Some(None) => Err(ServiceError::UnexpectedData(format!(
            "response from '{source}' has a non-numeric 'totalRecords'"
        ))),
        Some(Some(0)) => Ok(None),
        Some(Some(total)) => {
            if total > 1 {
                warn!("Got {total} records for '{source}'; using only the first");
            }
            match object.remove("instances") {
                Some(Value::Array(instances)) => match instances.into_iter().next() {
                    Some(instance) => Ok(Some(instance)),
                    None => Err(ServiceError::UnexpectedData(format!(
                        "response from '{source}' reports {total} records but lists none"
                    ))),
                },
                _ => Err(ServiceError::UnexpectedData(format!(
                    "response from '{source}' is missing the 'instances' list"
                ))),
            }
        }
    }
}

//! Field selection for list responses.
//!
//! Clients pass `fields=name,age` to receive only those properties of each
//! DTO. Names are matched case-insensitively against the serialized property
//! names; unknown names are dropped and an empty selection keeps everything.

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::dto::employee::EmployeeDto;

/// DTOs whose identity is needed after shaping, e.g. for link generation.
pub trait Identified {
    fn entity_id(&self) -> Uuid;
}

impl Identified for EmployeeDto {
    fn entity_id(&self) -> Uuid {
        self.id.get()
    }
}

/// A DTO reduced to the requested properties. The id is kept aside even when
/// it was not selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedEntity {
    pub id: Uuid,
    pub entity: Map<String, Value>,
}

fn requested_fields(fields: Option<&str>) -> Vec<&str> {
    let mut requested: Vec<&str> = Vec::new();
    for field in fields.unwrap_or_default().split(',').map(str::trim) {
        if field.is_empty() || requested.iter().any(|r| r.eq_ignore_ascii_case(field)) {
            continue;
        }
        requested.push(field);
    }
    requested
}

fn shape_one<T>(entity: &T, requested: &[&str]) -> Result<ShapedEntity, serde_json::Error>
where
    T: Serialize + Identified,
{
    let Value::Object(properties) = serde_json::to_value(entity)? else {
        return Err(serde_json::Error::custom(
            "shaped entities must serialize to a JSON object",
        ));
    };

    let entity_map = if requested.is_empty() {
        properties
    } else {
        let mut selected = Map::new();
        for field in requested {
            if let Some((key, value)) = properties
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(field))
            {
                selected.insert(key.clone(), value.clone());
            }
        }
        selected
    };

    Ok(ShapedEntity {
        id: entity.entity_id(),
        entity: entity_map,
    })
}

/// Shapes every entity with the same field selection.
pub fn shape_data<T>(entities: &[T], fields: Option<&str>) -> Result<Vec<ShapedEntity>, serde_json::Error>
where
    T: Serialize + Identified,
{
    let requested = requested_fields(fields);
    entities
        .iter()
        .map(|entity| shape_one(entity, &requested))
        .collect()
}

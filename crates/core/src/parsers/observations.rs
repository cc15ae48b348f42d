use serde_json::Value;

use super::ParseError;
use super::geometry::position_from_value;
use crate::model::Observation;

/// Parse an observation search response (`{"results": [...]}`) or a bare
/// array of observations.
///
/// Location comes from `geojson.coordinates` and the month from
/// `observed_on_details.month`; either may be absent.
pub fn parse_observations(data: &[u8]) -> Result<Vec<Observation>, ParseError> {
    let value: Value = serde_json::from_slice(data)?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get("results")
            .and_then(Value::as_array)
            .ok_or(ParseError::MissingField("results"))?,
        _ => return Err(ParseError::MissingField("results")),
    };
    Ok(items.iter().map(observation_from_value).collect())
}

fn observation_from_value(value: &Value) -> Observation {
    let coordinates = value
        .pointer("/geojson/coordinates")
        .filter(|c| c.as_array().is_some_and(|a| a.len() == 2))
        .and_then(position_from_value);
    let month = value
        .pointer("/observed_on_details/month")
        .and_then(Value::as_u64)
        .and_then(|m| u32::try_from(m).ok());
    Observation { coordinates, month }
}

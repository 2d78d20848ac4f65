//! Response deserialization into domain entities.
//!
//! The upstream API answers in three shapes: a JSON array of regions, a
//! `{"states": [...]}` envelope (which includes a test region with id `"0"`),
//! and an object carrying `lastActionIndex`. Every failure is reported as
//! [`AlertError::Deserialization`] with a copy of the response.

use alert_core::{AlertError, DecodeError, Region};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::sender::ApiResponse;

#[derive(Deserialize)]
struct StatesEnvelope {
    states: Vec<Region>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    last_action_index: i64,
}

/// Decode a region list body and return its first element.
pub fn region_from_response(response: &ApiResponse) -> Result<Region, AlertError> {
    regions_from_response(response)?
        .into_iter()
        .next()
        .ok_or_else(|| failure(response, DecodeError::EmptyRegionList))
}

/// Decode a region list body.
pub fn regions_from_response(response: &ApiResponse) -> Result<Vec<Region>, AlertError> {
    decode(response)
}

/// Decode a states envelope, dropping the test region.
pub fn regions_from_states_response(response: &ApiResponse) -> Result<Vec<Region>, AlertError> {
    let envelope: StatesEnvelope = decode(response)?;

    Ok(envelope
        .states
        .into_iter()
        .filter(|region| !region.is_sentinel())
        .collect())
}

/// Decode the `lastActionIndex` field of a status body.
pub fn last_action_index_from_response(response: &ApiResponse) -> Result<i64, AlertError> {
    let status: StatusBody = decode(response)?;
    Ok(status.last_action_index)
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, AlertError> {
    serde_json::from_str(&response.body).map_err(|e| failure(response, DecodeError::Json(e)))
}

fn failure(response: &ApiResponse, source: DecodeError) -> AlertError {
    AlertError::Deserialization {
        response: response.snapshot(),
        source,
    }
}

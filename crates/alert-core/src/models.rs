//! Region and alert entities as returned by the upstream API.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_not_blank, AlertError};

/// Identifier of the test region the "all regions" endpoint always includes.
pub const SENTINEL_REGION_ID: &str = "0";

/// An active warning scoped to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AlertWire")]
pub struct Alert {
    region_id: String,
    #[serde(rename = "type")]
    alert_type: String,
    last_update: String,
}

impl Alert {
    /// Create an alert. All fields must be non-blank.
    pub fn new(
        region_id: impl Into<String>,
        alert_type: impl Into<String>,
        last_update: impl Into<String>,
    ) -> Result<Self, AlertError> {
        let region_id = region_id.into();
        let alert_type = alert_type.into();
        let last_update = last_update.into();

        ensure_not_blank("region_id", &region_id)?;
        ensure_not_blank("alert_type", &alert_type)?;
        ensure_not_blank("last_update", &last_update)?;

        Ok(Self {
            region_id,
            alert_type,
            last_update,
        })
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn alert_type(&self) -> &str {
        &self.alert_type
    }

    /// Timestamp of the last update, as sent by the API.
    pub fn last_update(&self) -> &str {
        &self.last_update
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertWire {
    region_id: String,
    #[serde(rename = "type")]
    alert_type: String,
    last_update: String,
}

impl TryFrom<AlertWire> for Alert {
    type Error = AlertError;

    fn try_from(wire: AlertWire) -> Result<Self, Self::Error> {
        Alert::new(wire.region_id, wire.alert_type, wire.last_update)
    }
}

/// An administrative area tracked for alert status.
///
/// Regions are compared and hashed by name only: two snapshots of the same
/// region with different alerts are considered equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RegionWire")]
pub struct Region {
    #[serde(rename = "regionId")]
    id: String,
    #[serde(rename = "regionName")]
    name: String,
    #[serde(rename = "regionType")]
    region_type: String,
    #[serde(rename = "activeAlerts")]
    active_alerts: Vec<Alert>,
}

impl Region {
    /// Create a region. Id, name and type must be non-blank.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        region_type: impl Into<String>,
        active_alerts: Vec<Alert>,
    ) -> Result<Self, AlertError> {
        let id = id.into();
        let name = name.into();
        let region_type = region_type.into();

        ensure_not_blank("id", &id)?;
        ensure_not_blank("name", &name)?;
        ensure_not_blank("region_type", &region_type)?;

        Ok(Self {
            id,
            name,
            region_type,
            active_alerts,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region_type(&self) -> &str {
        &self.region_type
    }

    pub fn active_alerts(&self) -> &[Alert] {
        &self.active_alerts
    }

    /// Whether the region currently has at least one active alert.
    pub fn is_alert(&self) -> bool {
        !self.active_alerts.is_empty()
    }

    /// Whether this is the API's test region.
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_REGION_ID
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Region {}

impl Hash for Region {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegionWire {
    region_id: String,
    region_name: String,
    region_type: String,
    #[serde(default)]
    active_alerts: Option<Vec<Alert>>,
}

impl TryFrom<RegionWire> for Region {
    type Error = AlertError;

    fn try_from(wire: RegionWire) -> Result<Self, Self::Error> {
        Region::new(
            wire.region_id,
            wire.region_name,
            wire.region_type,
            wire.active_alerts.unwrap_or_default(),
        )
    }
}

//! Region alert status reported to observers and snapshot callers.

use serde::Serialize;

use crate::models::Region;

/// A region's alert flag at a point in time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAlertStatus {
    pub region_id: String,
    pub region_name: String,
    pub is_alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl RegionAlertStatus {
    /// Build a status carrying the full region payload.
    pub fn new(region: Region, is_alert: bool) -> Self {
        Self {
            region_id: region.id().to_string(),
            region_name: region.name().to_string(),
            is_alert,
            region: Some(region),
        }
    }

    /// Build a status whose flag is derived from the region's active alerts.
    pub fn from_region(region: Region) -> Self {
        let is_alert = region.is_alert();
        Self::new(region, is_alert)
    }
}

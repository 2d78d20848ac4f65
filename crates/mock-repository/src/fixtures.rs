//! Region fixtures for tests.

use alert_core::{Alert, Region};

/// An air raid alert for the given region id.
pub fn air_raid(region_id: &str) -> Alert {
    Alert::new(region_id, "AIR", "2024-03-01T10:00:00Z").expect("fixture alert is valid")
}

/// A state-level region without active alerts.
pub fn quiet_region(id: &str, name: &str) -> Region {
    Region::new(id, name, "State", Vec::new()).expect("fixture region is valid")
}

/// A state-level region with one air raid alert.
pub fn alerted_region(id: &str, name: &str) -> Region {
    Region::new(id, name, "State", vec![air_raid(id)]).expect("fixture region is valid")
}

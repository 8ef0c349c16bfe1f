use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Distance travelled since the last marker that triggers a progress marker.
    pub marker_distance_m: f64,
    /// Width and height of the region the map is recentred to.
    pub viewport_span_m: f64,
    pub start_marker_label: String,
    pub progress_marker_label: String,
    /// Used when no tracking flag has been persisted yet.
    pub track_on_first_launch: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            marker_distance_m: 100.0,
            viewport_span_m: 400.0,
            start_marker_label: "Starting Point".to_string(),
            progress_marker_label: "You have traveled 100 meters.".to_string(),
            track_on_first_launch: true,
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        if !(config.marker_distance_m > 0.0) {
            bail!(
                "`marker_distance_m` must be positive, got {}",
                config.marker_distance_m
            );
        }
        Ok(config)
    }
}

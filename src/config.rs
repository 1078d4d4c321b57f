use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::location::SubscriptionRequest;
use crate::map_surface::PolylineStyle;
use crate::storage::DEFAULT_TRACK_KEY;

/// Knobs of the tracking screen. Every field has a default, so a config
/// file only needs to mention what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub subscription: SubscriptionRequest,
    pub polyline: PolylineStyle,
    // `None` recenters without touching the zoom level
    pub camera_zoom: Option<f32>,
    pub persist_track: bool,
    pub storage_key: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            subscription: SubscriptionRequest::default(),
            polyline: PolylineStyle::default(),
            camera_zoom: None,
            persist_track: true,
            storage_key: DEFAULT_TRACK_KEY.to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            bail!("`storage_key` must not be empty");
        }
        if self.polyline.width_px.is_nan() || self.polyline.width_px <= 0.0 {
            bail!(
                "`polyline.width_px` must be positive, got {}",
                self.polyline.width_px
            );
        }
        let min_distance_m = self.subscription.min_distance_m;
        if min_distance_m.is_nan() || min_distance_m < 0.0 {
            bail!(
                "`subscription.min_distance_m` must not be negative, got {}",
                min_distance_m
            );
        }
        Ok(())
    }
}

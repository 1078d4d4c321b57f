use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::track::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct LocationSample {
    pub point: Point,
    pub timestamp_ms: Option<i64>,
    pub accuracy: Option<f32>,
    pub altitude: Option<f32>,
    pub speed: Option<f32>,
}

impl LocationSample {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        LocationSample {
            point: Point::new(latitude, longitude),
            timestamp_ms: None,
            accuracy: None,
            altitude: None,
            speed: None,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp_ms.and_then(DateTime::from_timestamp_millis)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gps,
    Network,
    Passive,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionRequest {
    pub min_interval_ms: u64,
    pub min_distance_m: f32,
    pub provider: Provider,
}

impl Default for SubscriptionRequest {
    fn default() -> Self {
        SubscriptionRequest {
            min_interval_ms: 1000,
            min_distance_m: 10.0,
            provider: Provider::Gps,
        }
    }
}

/// The platform location service. Samples are delivered by the host calling
/// `TrackingController::on_location` on its UI thread, so the source itself
/// only needs to manage the subscription.
pub trait LocationSource {
    fn subscribe(&mut self, request: &SubscriptionRequest) -> Result<()>;
    fn unsubscribe(&mut self);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum SampleOutcome {
    Appended = 0,
    // negative values are for samples that never reach the track
    Ignored = -1,
}

impl SampleOutcome {
    pub fn to_int(&self) -> i8 {
        *self as i8
    }
}

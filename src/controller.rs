use anyhow::Result;
use strum_macros::Display;

use crate::config::TrackerConfig;
use crate::location::{LocationSample, LocationSource, SampleOutcome};
use crate::map_surface::MapSurface;
use crate::permission::{Notifier, PermissionGate, PermissionProvider, PermissionStatus};
use crate::storage::{KeyValueStore, TrackStore};
use crate::track::Track;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum TrackingState {
    Idle,
    Tracking,
}

/// What the host platform provides to the controller.
pub struct Collaborators {
    pub location_source: Box<dyn LocationSource>,
    pub map_surface: Box<dyn MapSurface>,
    pub permissions: Box<dyn PermissionProvider>,
    pub notifier: Box<dyn Notifier>,
    // `None` disables persistence
    pub store: Option<Box<dyn KeyValueStore>>,
}

/// Drives one tracking screen. The host calls it serially from its UI
/// thread: button clicks, location callbacks, permission callbacks and
/// lifecycle events.
///
/// `TrackingState` is the user's intent. Whether a subscription is actually
/// held is tracked separately, since pausing the screen releases it while the
/// user is still tracking.
pub struct TrackingController {
    config: TrackerConfig,
    state: TrackingState,
    track: Track,
    location_source: Box<dyn LocationSource>,
    map_surface: Box<dyn MapSurface>,
    permission_gate: PermissionGate,
    track_store: Option<TrackStore<Box<dyn KeyValueStore>>>,
    subscribed: bool,
    // set while a permission request is answering a start or resume
    subscribe_on_grant: bool,
}

impl TrackingController {
    /// Restores the stored track, if any. A stored value that cannot be
    /// parsed fails the whole construction.
    pub fn new(collaborators: Collaborators, config: TrackerConfig) -> Result<Self> {
        let Collaborators {
            location_source,
            map_surface,
            permissions,
            notifier,
            store,
        } = collaborators;

        let track_store = if config.persist_track {
            store.map(|store| TrackStore::with_key(store, &config.storage_key))
        } else {
            None
        };
        let track = match &track_store {
            Some(track_store) => track_store.load()?,
            None => Track::new(),
        };
        info!(
            "[controller] created, restored {} points, persistence {}",
            track.len(),
            if track_store.is_some() { "on" } else { "off" }
        );

        Ok(TrackingController {
            config,
            state: TrackingState::Idle,
            track,
            location_source,
            map_surface,
            permission_gate: PermissionGate::new(permissions, notifier),
            track_store,
            subscribed: false,
            subscribe_on_grant: false,
        })
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn start(&mut self) -> Result<()> {
        if self.state == TrackingState::Tracking {
            debug!("[controller] `start` while already tracking");
            return Ok(());
        }
        match self.permission_gate.check_or_request() {
            PermissionStatus::Granted => {
                self.subscribe()?;
                self.state = TrackingState::Tracking;
                info!("[controller] tracking started");
            }
            PermissionStatus::Requested => {
                self.subscribe_on_grant = true;
                info!("[controller] start deferred until permission is granted");
            }
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        self.subscribe_on_grant = false;
        if self.state == TrackingState::Idle {
            debug!("[controller] `stop` while idle");
            return;
        }
        self.release();
        self.state = TrackingState::Idle;
        info!("[controller] tracking stopped");
    }

    /// Drops the track, the drawn polyline and the stored copy. The
    /// subscription is not touched.
    pub fn clear(&mut self) -> Result<()> {
        info!("[controller] clearing {} points", self.track.len());
        // the stored copy goes first, a failure keeps everything in place
        if let Some(track_store) = &mut self.track_store {
            track_store.clear()?;
        }
        self.track.clear();
        self.map_surface.clear();
        Ok(())
    }

    pub fn on_location(&mut self, sample: Option<LocationSample>) -> SampleOutcome {
        if self.state != TrackingState::Tracking {
            debug!("[controller] sample ignored, not tracking");
            return SampleOutcome::Ignored;
        }
        let sample = match sample {
            Some(sample) => sample,
            None => return SampleOutcome::Ignored,
        };

        let point = sample.point;
        self.track.push(point);
        debug!(
            "[controller] point #{} appended, timestamp={:?}",
            self.track.len(),
            sample.timestamp()
        );
        self.redraw();
        self.map_surface.move_camera(point, self.config.camera_zoom);

        if let Some(track_store) = &mut self.track_store {
            // the next sample saves the whole track again
            if let Err(error) = track_store.save(&self.track) {
                warn!("[controller] failed to save track: {:?}", error);
            }
        }
        SampleOutcome::Appended
    }

    pub fn on_permission_result(&mut self, granted: bool) -> Result<()> {
        let waiting = std::mem::take(&mut self.subscribe_on_grant);
        if self.permission_gate.on_result(granted) {
            if waiting {
                self.subscribe()?;
                self.state = TrackingState::Tracking;
                info!("[controller] tracking started after permission grant");
            }
        } else if !self.subscribed && self.state == TrackingState::Tracking {
            // lost access while paused, there is nothing left to track with
            self.state = TrackingState::Idle;
        }
        Ok(())
    }

    pub fn on_map_ready(&mut self) {
        debug!("[controller] map ready");
        self.redraw();
    }

    pub fn on_pause(&mut self) {
        debug!("[controller] paused");
        self.release();
    }

    pub fn on_resume(&mut self) -> Result<()> {
        debug!("[controller] resumed");
        if self.state != TrackingState::Tracking || self.subscribed {
            return Ok(());
        }
        match self.permission_gate.check_or_request() {
            PermissionStatus::Granted => self.subscribe(),
            PermissionStatus::Requested => {
                self.subscribe_on_grant = true;
                Ok(())
            }
        }
    }

    fn subscribe(&mut self) -> Result<()> {
        if !self.subscribed {
            self.location_source.subscribe(&self.config.subscription)?;
            self.subscribed = true;
        }
        Ok(())
    }

    fn release(&mut self) {
        if self.subscribed {
            self.location_source.unsubscribe();
            self.subscribed = false;
        }
    }

    fn redraw(&mut self) {
        self.map_surface.clear();
        if !self.track.is_empty() {
            self.map_surface
                .add_polyline(self.track.points(), &self.config.polyline);
        }
    }
}

impl Drop for TrackingController {
    fn drop(&mut self) {
        self.release();
    }
}

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use trackline_core::{
    controller::Collaborators,
    location::{LocationSample, LocationSource, SubscriptionRequest},
    map_surface::{MapSurface, PolylineStyle},
    permission::{Notifier, PermissionProvider},
    storage::{KeyValueStore, MemoryStore},
    track::Point,
};

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    AddPolyline(Vec<Point>, PolylineStyle),
    Clear,
    MoveCamera(Point, Option<f32>),
}

#[derive(Default)]
pub struct LocationLog {
    pub subscriptions: Vec<SubscriptionRequest>,
    pub unsubscribes: usize,
    pub active: bool,
    pub fail_next_subscribe: bool,
}

pub struct FakeLocationSource(Rc<RefCell<LocationLog>>);

impl LocationSource for FakeLocationSource {
    fn subscribe(&mut self, request: &SubscriptionRequest) -> Result<()> {
        let mut log = self.0.borrow_mut();
        if log.fail_next_subscribe {
            log.fail_next_subscribe = false;
            anyhow::bail!("location service unavailable");
        }
        assert!(!log.active, "subscribed twice");
        log.subscriptions.push(request.clone());
        log.active = true;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        let mut log = self.0.borrow_mut();
        log.unsubscribes += 1;
        log.active = false;
    }
}

pub struct FakeMap(Rc<RefCell<Vec<MapCall>>>);

impl MapSurface for FakeMap {
    fn add_polyline(&mut self, points: &[Point], style: &PolylineStyle) {
        self.0
            .borrow_mut()
            .push(MapCall::AddPolyline(points.to_vec(), style.clone()));
    }

    fn clear(&mut self) {
        self.0.borrow_mut().push(MapCall::Clear);
    }

    fn move_camera(&mut self, center: Point, zoom: Option<f32>) {
        self.0.borrow_mut().push(MapCall::MoveCamera(center, zoom));
    }
}

pub struct FakePermissions {
    granted: Rc<Cell<bool>>,
    requests: Rc<Cell<usize>>,
}

impl PermissionProvider for FakePermissions {
    fn is_granted(&self) -> bool {
        self.granted.get()
    }

    fn request(&mut self) {
        self.requests.set(self.requests.get() + 1);
    }
}

pub struct FakeNotifier(Rc<RefCell<Vec<String>>>);

impl Notifier for FakeNotifier {
    fn show_notice(&mut self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

// lets the test look at what the controller stored, and make writes fail
pub struct SharedStore {
    values: Rc<RefCell<MemoryStore>>,
    failing_puts: Rc<Cell<usize>>,
    failing_removes: Rc<Cell<bool>>,
}

impl KeyValueStore for SharedStore {
    fn get_string(&self, key: &str, default: &str) -> Result<String> {
        self.values.borrow().get_string(key, default)
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        let failing_puts = self.failing_puts.get();
        if failing_puts > 0 {
            self.failing_puts.set(failing_puts - 1);
            anyhow::bail!("disk full");
        }
        self.values.borrow_mut().put_string(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.failing_removes.get() {
            anyhow::bail!("read-only storage");
        }
        self.values.borrow_mut().remove(key)
    }
}

/// Handles to everything a controller built by `collaborators` talks to.
pub struct FakeHost {
    pub location: Rc<RefCell<LocationLog>>,
    pub map_calls: Rc<RefCell<Vec<MapCall>>>,
    pub granted: Rc<Cell<bool>>,
    pub permission_requests: Rc<Cell<usize>>,
    pub notices: Rc<RefCell<Vec<String>>>,
    pub store: Rc<RefCell<MemoryStore>>,
    // the next `n` writes fail
    pub failing_puts: Rc<Cell<usize>>,
    pub failing_removes: Rc<Cell<bool>>,
}

impl FakeHost {
    pub fn new(granted: bool) -> Self {
        FakeHost {
            location: Rc::new(RefCell::new(LocationLog::default())),
            map_calls: Rc::new(RefCell::new(Vec::new())),
            granted: Rc::new(Cell::new(granted)),
            permission_requests: Rc::new(Cell::new(0)),
            notices: Rc::new(RefCell::new(Vec::new())),
            store: Rc::new(RefCell::new(MemoryStore::new())),
            failing_puts: Rc::new(Cell::new(0)),
            failing_removes: Rc::new(Cell::new(false)),
        }
    }

    pub fn collaborators(&self, with_store: bool) -> Collaborators {
        Collaborators {
            location_source: Box::new(FakeLocationSource(self.location.clone())),
            map_surface: Box::new(FakeMap(self.map_calls.clone())),
            permissions: Box::new(FakePermissions {
                granted: self.granted.clone(),
                requests: self.permission_requests.clone(),
            }),
            notifier: Box::new(FakeNotifier(self.notices.clone())),
            store: if with_store {
                Some(Box::new(SharedStore {
                    values: self.store.clone(),
                    failing_puts: self.failing_puts.clone(),
                    failing_removes: self.failing_removes.clone(),
                }))
            } else {
                None
            },
        }
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        let value = self.store.borrow().get_string(key, "").unwrap();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    pub fn last_polyline(&self) -> Option<Vec<Point>> {
        self.map_calls.borrow().iter().rev().find_map(|call| match call {
            MapCall::AddPolyline(points, _) => Some(points.clone()),
            _ => None,
        })
    }
}

// A short walk along the Bund in Shanghai.
pub fn walk() -> Vec<LocationSample> {
    [
        (31.2400, 121.4900),
        (31.2405, 121.4903),
        (31.2411, 121.4906),
        (31.2418, 121.4910),
        (31.2424, 121.4913),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(lat, lng))| LocationSample {
        timestamp_ms: Some(1697349116000 + i as i64 * 1000),
        accuracy: Some(3.9),
        ..LocationSample::at(lat, lng)
    })
    .collect()
}

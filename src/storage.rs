use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::track::Track;
use crate::track_codec;

pub const DEFAULT_TRACK_KEY: &str = "polyline_coordinates";

/// String preferences of the host (e.g. shared preferences on Android).
pub trait KeyValueStore {
    fn get_string(&self, key: &str, default: &str) -> Result<String>;
    fn put_string(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_string(&self, key: &str, default: &str) -> Result<String> {
        (**self).get_string(key, default)
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).put_string(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            values: HashMap::new(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str, default: &str) -> Result<String> {
        Ok(self
            .values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

pub struct TrackStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TrackStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_TRACK_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        TrackStore {
            store,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&mut self, track: &Track) -> Result<()> {
        self.store.put_string(&self.key, &track_codec::encode(track))
    }

    // There is no recovery from a corrupted value, the parse error is
    // returned as is.
    pub fn load(&self) -> Result<Track> {
        let value = self.store.get_string(&self.key, "")?;
        if value.is_empty() {
            return Ok(Track::new());
        }
        let track = track_codec::decode(&value)
            .with_context(|| format!("failed to parse stored track `{}`", self.key))?;
        debug!("[storage] loaded track with {} points", track.len());
        Ok(track)
    }

    pub fn clear(&mut self) -> Result<()> {
        debug!("[storage] removing stored track");
        self.store.remove(&self.key)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

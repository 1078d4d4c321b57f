#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod config;
pub mod controller;
pub mod export_data;
pub mod location;
pub mod logs;
pub mod map_surface;
pub mod permission;
pub mod preference_db;
pub mod storage;
pub mod track;
pub mod track_codec;
pub mod utils;

use serde::{Deserialize, Serialize};

use crate::track::Point;

/// Packed `0xAARRGGBB`, the layout mobile map SDKs take.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const BLUE: Color = Color(0xFF00_00FF);
    pub const RED: Color = Color(0xFFFF_0000);

    pub fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolylineStyle {
    pub width_px: f32,
    pub color: Color,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        PolylineStyle {
            width_px: 5.0,
            color: Color::BLUE,
        }
    }
}

pub trait MapSurface {
    fn add_polyline(&mut self, points: &[Point], style: &PolylineStyle);
    fn clear(&mut self);
    // `None` keeps the current zoom level
    fn move_camera(&mut self, center: Point, zoom: Option<f32>);
}

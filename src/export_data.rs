use std::io::Write;

use anyhow::Result;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::track;

pub fn track_to_gpx(track: &track::Track) -> Gpx {
    let mut segment = TrackSegment::new();
    segment.points = track
        .points()
        .iter()
        // `geo_types::Point` is (x, y), i.e. (lng, lat)
        .map(|point| Waypoint::new(Point::new(point.longitude, point.latitude)))
        .collect();

    let mut gpx_track = Track::new();
    gpx_track.name = Some("Track 1".to_string());
    gpx_track.segments.push(segment);

    let mut gpx = Gpx::default();
    gpx.version = GpxVersion::Gpx11;
    gpx.creator = Some(env!("CARGO_PKG_NAME").to_string());
    gpx.tracks.push(gpx_track);
    gpx
}

pub fn track_to_gpx_file<W: Write>(track: &track::Track, writer: &mut W) -> Result<()> {
    let gpx = track_to_gpx(track);
    gpx::write(&gpx, writer)?;
    Ok(())
}

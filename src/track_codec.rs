/* Text form of a track, as it is kept in the host's key-value store:

     "lat,lng;lat,lng;...;"

   Every point is terminated by `;`. Numbers use Rust's float formatting,
   which is locale independent and round-trips exactly, so decoding an
   encoded track gives back the very same coordinates.
*/
use std::fmt;

use itertools::Itertools;

use crate::track::{Point, Track};

const POINT_DELIMITER: char = ';';
const FIELD_DELIMITER: char = ',';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackCodecError {
    // a segment did not have exactly two fields
    FieldCount { index: usize, segment: String },
    InvalidNumber { index: usize, field: String },
}

impl fmt::Display for TrackCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackCodecError::FieldCount { index, segment } => write!(
                f,
                "point #{} is not a `lat,lng` pair: {:?}",
                index, segment
            ),
            TrackCodecError::InvalidNumber { index, field } => {
                write!(f, "point #{} has an invalid coordinate: {:?}", index, field)
            }
        }
    }
}

impl std::error::Error for TrackCodecError {}

pub fn encode(track: &Track) -> String {
    track
        .points()
        .iter()
        .map(|point| {
            format!(
                "{}{}{}{}",
                point.latitude, FIELD_DELIMITER, point.longitude, POINT_DELIMITER
            )
        })
        .join("")
}

pub fn decode(input: &str) -> Result<Track, TrackCodecError> {
    let mut track = Track::new();
    // empty segments are skipped, the trailing one always exists
    for (index, segment) in input
        .split(POINT_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .enumerate()
    {
        let (lat, lng) = match segment.split(FIELD_DELIMITER).collect_tuple() {
            Some(fields) => fields,
            None => {
                return Err(TrackCodecError::FieldCount {
                    index,
                    segment: segment.to_string(),
                })
            }
        };
        track.push(Point::new(
            parse_coordinate(index, lat)?,
            parse_coordinate(index, lng)?,
        ));
    }
    Ok(track)
}

fn parse_coordinate(index: usize, field: &str) -> Result<f64, TrackCodecError> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| TrackCodecError::InvalidNumber {
            index,
            field: field.to_string(),
        })
}

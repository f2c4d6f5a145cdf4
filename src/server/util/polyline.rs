//! Google encoded polyline codec.
//!
//! Routes are stored in the compact polyline format produced by the Directions API (precision
//! 1e5). The offline route viewer needs plain coordinates, so the server decodes the polyline
//! into `[lng, lat]` pairs, the axis order used by GeoJSON.
//!
//! Decoding validates its input: a polyline that ends in the middle of a value, contains
//! characters outside the encoding alphabet, or produces coordinates outside the valid
//! latitude/longitude ranges is rejected rather than partially decoded.

use thiserror::Error;

const PRECISION: f64 = 1e5;

/// Offset added to every 5-bit chunk to keep encoded characters printable
const CHAR_OFFSET: u8 = 63;

/// Continuation bit of a 5-bit chunk
const CONTINUATION: i64 = 0x20;

/// A single value never needs more than 7 chunks (35 bits) at 1e5 precision
const MAX_SHIFT: u32 = 35;

#[derive(Error, Debug, PartialEq)]
pub enum PolylineError {
    #[error("Polyline ends in the middle of a value at byte {0}")]
    Truncated(usize),
    #[error("Invalid polyline character {character:?} at byte {index}")]
    InvalidCharacter { index: usize, character: char },
    #[error("Polyline value starting before byte {0} is too large")]
    Overflow(usize),
    #[error("Decoded coordinate (lat {lat}, lng {lng}) is out of range")]
    OutOfRange { lat: f64, lng: f64 },
}

/// Geographic extent of a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Decodes an encoded polyline into `[lng, lat]` pairs.
///
/// An empty string decodes to an empty list.
pub fn decode(encoded: &str) -> Result<Vec<[f64; 2]>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut coordinates = Vec::new();

    while index < bytes.len() {
        lat += decode_value(bytes, &mut index)?;
        lng += decode_value(bytes, &mut index)?;

        let point_lat = lat as f64 / PRECISION;
        let point_lng = lng as f64 / PRECISION;

        if !(-90.0..=90.0).contains(&point_lat) || !(-180.0..=180.0).contains(&point_lng) {
            return Err(PolylineError::OutOfRange {
                lat: point_lat,
                lng: point_lng,
            });
        }

        coordinates.push([point_lng, point_lat]);
    }

    Ok(coordinates)
}

/// Encodes `[lng, lat]` pairs into a polyline, rounding to 1e5 precision.
pub fn encode(coordinates: &[[f64; 2]]) -> String {
    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for [lng, lat] in coordinates {
        let lat = (lat * PRECISION).round() as i64;
        let lng = (lng * PRECISION).round() as i64;

        encode_value(lat - prev_lat, &mut encoded);
        encode_value(lng - prev_lng, &mut encoded);

        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

/// Computes the bounding box of `[lng, lat]` pairs, `None` when there are no coordinates.
pub fn bounding_box(coordinates: &[[f64; 2]]) -> Option<BoundingBox> {
    let [first_lng, first_lat] = *coordinates.first()?;

    let initial = BoundingBox {
        north: first_lat,
        south: first_lat,
        east: first_lng,
        west: first_lng,
    };

    Some(
        coordinates
            .iter()
            .fold(initial, |bounds, [lng, lat]| BoundingBox {
                north: bounds.north.max(*lat),
                south: bounds.south.min(*lat),
                east: bounds.east.max(*lng),
                west: bounds.west.min(*lng),
            }),
    )
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated(*index));
        };

        if !(CHAR_OFFSET..=CHAR_OFFSET + 63).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                index: *index,
                character: byte as char,
            });
        }

        if shift >= MAX_SHIFT {
            return Err(PolylineError::Overflow(start));
        }

        let chunk = i64::from(byte - CHAR_OFFSET);
        *index += 1;

        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < CONTINUATION {
            break;
        }
    }

    // Zig-zag decoding
    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn encode_value(value: i64, encoded: &mut String) {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };

    while value >= CONTINUATION {
        encoded.push(char::from(((CONTINUATION | (value & 0x1f)) as u8) + CHAR_OFFSET));
        value >>= 5;
    }

    encoded.push(char::from(value as u8 + CHAR_OFFSET));
}

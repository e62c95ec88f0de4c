use chrono::{DateTime, NaiveDateTime};
use nom_exif::{EntryValue, Exif, ExifIter, ExifTag, GPSInfo, LatLng, MediaParser, MediaSource};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use super::{CaptureMetadata, Coordinate, ExtractError, FocalLength};

// DateTime (IFD0), used when DateTimeOriginal is missing
const TAG_DATE_TIME: u16 = 0x0132;

/// Read capture metadata from an image byte stream.
///
/// Fails only when the stream cannot be decoded as an image carrying EXIF
/// (not an image, truncated, unsupported format, no EXIF block).
pub fn extract<R: Read + Seek>(reader: R) -> Result<CaptureMetadata, ExtractError> {
    let mut parser = MediaParser::new();
    let ms = MediaSource::seekable(reader).map_err(|e| ExtractError::Decode(e.to_string()))?;

    let iter: ExifIter = parser
        .parse(ms)
        .map_err(|e| ExtractError::Decode(e.to_string()))?;

    // Parse GPS info before converting to Exif (consumes the iterator)
    let gps_info = iter.parse_gps_info().ok().flatten();
    let exif: Exif = iter.into();

    let captured_at = exif
        .get(ExifTag::DateTimeOriginal)
        .and_then(entry_to_datetime)
        .or_else(|| {
            exif.get_by_ifd_tag_code(0, TAG_DATE_TIME)
                .and_then(entry_to_datetime)
        });

    Ok(CaptureMetadata {
        camera_model: exif.get(ExifTag::Model).and_then(entry_to_string),
        focal_length: exif.get(ExifTag::FocalLength).and_then(entry_to_focal_length),
        captured_at,
        coordinate: gps_info.as_ref().and_then(gps_to_coordinate),
    })
}

/// Open `path` and read its capture metadata.
pub fn extract_path(path: &Path) -> Result<CaptureMetadata, ExtractError> {
    let file = File::open(path)?;
    extract(BufReader::new(file))
}

/// Convert an EntryValue to an Option<String>.
fn entry_to_string(val: &EntryValue) -> Option<String> {
    let s = val.to_string();
    let s = s.trim().trim_matches('"').trim_end_matches('\0').trim().to_string();
    if s.is_empty() { None } else { Some(s) }
}

/// First rational of the value; zero denominators are malformed.
fn entry_to_focal_length(val: &EntryValue) -> Option<FocalLength> {
    let (numerator, denominator) = match val {
        EntryValue::URational(r) => (r.0, r.1),
        EntryValue::URationalArray(values) => {
            let r = values.first()?;
            (r.0, r.1)
        }
        _ => return None,
    };
    if denominator == 0 {
        return None;
    }
    Some(FocalLength { numerator, denominator })
}

fn entry_to_datetime(val: &EntryValue) -> Option<NaiveDateTime> {
    parse_capture_time(&entry_to_string(val)?)
}

/// Parse the textual forms a capture time shows up in.
///
/// Offsets are dropped: the result is the wall-clock time the camera
/// recorded.
fn parse_capture_time(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    [
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn gps_to_coordinate(gps: &GPSInfo) -> Option<Coordinate> {
    let latitude = latlng_to_decimal(&gps.latitude, gps.latitude_ref)?;
    let longitude = latlng_to_decimal(&gps.longitude, gps.longitude_ref)?;
    Some(Coordinate { latitude, longitude })
}

/// Convert a nom-exif LatLng (3 URationals: deg, min, sec) to decimal degrees.
fn latlng_to_decimal(latlng: &LatLng, reference: char) -> Option<f64> {
    let degrees = latlng.0.0 as f64 / latlng.0.1 as f64;
    let minutes = latlng.1.0 as f64 / latlng.1.1 as f64;
    let seconds = latlng.2.0 as f64 / latlng.2.1 as f64;

    let mut coord = degrees + minutes / 60.0 + seconds / 3600.0;
    if !coord.is_finite() {
        return None;
    }

    if reference == 'S' || reference == 'W' {
        coord = -coord;
    }

    Some(coord)
}

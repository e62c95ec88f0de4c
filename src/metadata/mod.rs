//! Capture metadata extraction.
//!
//! [`extract`] decodes an image byte stream with `nom-exif` and reads four
//! independent facets: camera model, focal length, capture time and GPS
//! coordinate. Any facet may be missing; only an undecodable container is
//! an error.

mod reader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use reader::{extract, extract_path};

use chrono::NaiveDateTime;
use serde::Serialize;

/// Capture data read from a single image.
///
/// Every facet is optional. A facet that is absent or malformed in the
/// file is `None` here, never a placeholder value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaptureMetadata {
    pub camera_model: Option<String>,
    pub focal_length: Option<FocalLength>,
    pub captured_at: Option<NaiveDateTime>,
    /// Coordinate exactly as decoded, including (0, 0).
    pub coordinate: Option<Coordinate>,
}

impl CaptureMetadata {
    /// The coordinate to geocode, if any.
    ///
    /// A coordinate with a zero latitude or a zero longitude counts as
    /// unset. Cameras write (0, 0) when they have no fix, so a real point
    /// on the equator or the prime meridian is reported as "no location".
    pub fn location(&self) -> Option<Coordinate> {
        self.coordinate.filter(|c| c.latitude != 0.0 && c.longitude != 0.0)
    }
}

/// Focal length as the raw EXIF rational (millimetres).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocalLength {
    pub numerator: u32,
    pub denominator: u32,
}

impl std::fmt::Display for FocalLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Latitude/longitude in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Why an image yielded no metadata at all.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to open image: {0}")]
    Io(#[from] std::io::Error),
    #[error("no readable EXIF metadata: {0}")]
    Decode(String),
}

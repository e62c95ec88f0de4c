//! Per-file outcome reporting.
//!
//! The [`Pipeline`](crate::pipeline::Pipeline) hands every [`FileReport`] to
//! a [`Reporter`] as soon as the file is finished. [`LogReporter`] writes
//! them through the `log` facade; tests plug in their own collector.

use crate::geocode::GeocodeResult;
use crate::pipeline::{FileReport, Outcome};

/// Sink for per-file outcomes.
pub trait Reporter {
    fn report(&mut self, report: &FileReport);
}

/// Reports outcomes through `log` at a severity matching the outcome.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, report: &FileReport) {
        let path = report
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        if let Some(meta) = report.outcome.metadata() {
            log::info!("File: {path}");
            log::debug!("  Camera: {:?}", meta.camera_model);
            if let Some(focal) = meta.focal_length {
                log::debug!("  Focal: {focal}");
            }
            log::debug!("  Taken: {:?}", meta.captured_at);
            if let Some(c) = meta.coordinate {
                log::debug!("  Latitude, Longitude: {}, {}", c.latitude, c.longitude);
            }
        }

        match &report.outcome {
            Outcome::NotImage => log::debug!("Skipping non-image: {path}"),
            Outcome::NoMetadata { error } => {
                log::error!("File: {path}: no metadata ({error})");
            }
            Outcome::NoLocation { .. } => log::warn!("  Can't get location!"),
            Outcome::Located { result, .. } => log_result(result),
            Outcome::LookupFailed { coordinate, error, .. } => {
                log::error!("  Location lookup for {coordinate} failed: {error}");
            }
            Outcome::WalkFailed { error } => log::error!("Walk error at {path}: {error}"),
        }
    }
}

fn log_result(result: &GeocodeResult) {
    match result {
        GeocodeResult::Resolved { name, vicinity: Some(vicinity) } => {
            log::info!("  Location: {name} ({vicinity})");
        }
        GeocodeResult::Resolved { name, vicinity: None } => log::info!("  Location: {name}"),
        GeocodeResult::NoResults => log::warn!("  Location not found!"),
        GeocodeResult::InvalidRequest => log::warn!("  Invalid request!"),
        GeocodeResult::Denied => log::error!("  Request denied!"),
        GeocodeResult::UnknownError => log::error!("  Unknown error!"),
        GeocodeResult::QuotaExceeded => {
            log::error!("  Quota exceeded! Please wait several minutes...");
        }
    }
}

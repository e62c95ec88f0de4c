//! # photo-places
//!
//! Walk a directory tree, read capture metadata (camera model, focal length,
//! capture time, GPS position) from every JPEG/PNG/BMP, and resolve GPS-tagged
//! images to the nearest named place using a nearby-search service.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photo_places::config::Config;
//! use photo_places::pipeline::Pipeline;
//! use photo_places::report::LogReporter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::load(Some("config.json".as_ref()))?;
//!     config.places.api_key = std::env::var("PLACES_API_KEY")?;
//!     config.validate()?;
//!
//!     let pipeline = Pipeline::from_config(&config)?;
//!     let summary = pipeline.run("./photos".as_ref(), &mut LogReporter).await;
//!
//!     println!("{} of {} images located", summary.located, summary.images);
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! ```rust,no_run
//! use photo_places::geocode::{GeocodeResult, NearbySearchClient, PlaceLookup};
//! use photo_places::metadata::extract_path;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let meta = extract_path(Path::new("IMG_0042.jpg"))?;
//!     println!("Camera: {:?}", meta.camera_model);
//!
//!     if let Some(coordinate) = meta.location() {
//!         let client = NearbySearchClient::new(
//!             "AIza...".into(),
//!             photo_places::config::DEFAULT_ENDPOINT.into(),
//!             Duration::from_secs(30),
//!         )?;
//!         if let GeocodeResult::Resolved { name, .. } = client.resolve(coordinate).await? {
//!             println!("Taken near {name}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration types and loading/saving
//! - [`discover`]: Directory walking and image classification
//! - [`metadata`]: EXIF capture metadata extraction
//! - [`geocode`]: Nearby-place lookup and status classification
//! - [`pipeline`]: Per-file processing and the run loop
//! - [`report`]: Outcome reporting

pub mod config;
pub mod discover;
pub mod geocode;
pub mod metadata;
pub mod pipeline;
pub mod report;

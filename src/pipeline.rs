use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::discover::{self, ImageKind};
use crate::geocode::{GeocodeResult, NearbySearchClient, PlaceLookup, ResolveError};
use crate::metadata::{self, CaptureMetadata, Coordinate};
use crate::report::Reporter;

/// Process exit status when the API key is missing.
pub const EXIT_MISSING_API_KEY: u8 = 2;
/// Process exit status when the place service reports quota exhaustion.
pub const EXIT_QUOTA_EXCEEDED: u8 = 3;

/// What happened to one walked entry.
///
/// Per file: classified by extension, then metadata extracted, then
/// (only with a usable coordinate) resolved. `NotImage` and `NoMetadata`
/// are the skipped states; the rest are done.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Extension not on the allow-list. The file was never opened.
    NotImage,
    /// The file could not be opened or decoded.
    NoMetadata { error: String },
    /// Metadata read, but no coordinate (or a zero one).
    NoLocation { metadata: CaptureMetadata },
    /// The place service answered; `result` may still be a service error.
    Located {
        metadata: CaptureMetadata,
        coordinate: Coordinate,
        result: GeocodeResult,
    },
    /// The lookup never got a usable answer (network, HTTP, bad JSON).
    LookupFailed {
        metadata: CaptureMetadata,
        coordinate: Coordinate,
        error: String,
    },
    /// The directory walk could not read this entry.
    WalkFailed { error: String },
}

impl Outcome {
    pub fn metadata(&self) -> Option<&CaptureMetadata> {
        match self {
            Self::NoLocation { metadata }
            | Self::Located { metadata, .. }
            | Self::LookupFailed { metadata, .. } => Some(metadata),
            _ => None,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::Located { result, .. } if result.is_quota_exceeded())
    }

    fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NoMetadata { .. } | Self::LookupFailed { .. } | Self::WalkFailed { .. }
        )
    }
}

/// Outcome of one walked entry, with where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// `None` only for walk errors that carry no path.
    pub path: Option<PathBuf>,
    pub kind: Option<ImageKind>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The whole tree was walked.
    #[default]
    Completed,
    /// The place service ran out of quota; later files were not touched.
    QuotaExceeded,
}

impl RunStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Completed => 0,
            Self::QuotaExceeded => EXIT_QUOTA_EXCEEDED,
        }
    }
}

/// Everything a run produced, in walk order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub status: RunStatus,
    pub files_seen: usize,
    pub images: usize,
    pub located: usize,
    pub failures: usize,
    pub reports: Vec<FileReport>,
}

impl RunSummary {
    fn record(&mut self, report: FileReport) {
        if !matches!(report.outcome, Outcome::WalkFailed { .. }) {
            self.files_seen += 1;
        }
        if report.kind.is_some() {
            self.images += 1;
        }
        if matches!(
            report.outcome,
            Outcome::Located { result: GeocodeResult::Resolved { .. }, .. }
        ) {
            self.located += 1;
        }
        if report.outcome.is_failure() {
            self.failures += 1;
        }
        self.reports.push(report);
    }
}

/// Drives discovery, extraction and place lookup, one file at a time.
///
/// # Example
///
/// ```rust,no_run
/// use photo_places::config::Config;
/// use photo_places::pipeline::Pipeline;
/// use photo_places::report::LogReporter;
///
/// # async fn example() -> anyhow::Result<()> {
/// let mut config = Config::load(Some("config.json".as_ref()))?;
/// config.places.api_key = "AIza...".into();
/// config.validate()?;
///
/// let pipeline = Pipeline::from_config(&config)?;
/// let summary = pipeline.run(&config.scan.directory, &mut LogReporter).await;
/// println!("{} located, status {:?}", summary.located, summary.status);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    lookup: Box<dyn PlaceLookup>,
}

impl Pipeline {
    pub fn new(lookup: Box<dyn PlaceLookup>) -> Self {
        Self { lookup }
    }

    /// Build a pipeline backed by [`NearbySearchClient`].
    pub fn from_config(config: &Config) -> Result<Self, ResolveError> {
        Ok(Self::new(Box::new(NearbySearchClient::from_config(config)?)))
    }

    /// Run one file through classification, extraction and lookup.
    ///
    /// The image file is closed before the lookup starts.
    pub async fn process_file(&self, path: &Path) -> Outcome {
        if !discover::is_image(path) {
            return Outcome::NotImage;
        }

        let metadata = match metadata::extract_path(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                return Outcome::NoMetadata {
                    error: e.to_string(),
                };
            }
        };

        let Some(coordinate) = metadata.location() else {
            return Outcome::NoLocation { metadata };
        };

        log::debug!("Looking up {coordinate} via {}", self.lookup.name());
        match self.lookup.resolve(coordinate).await {
            Ok(result) => Outcome::Located {
                metadata,
                coordinate,
                result,
            },
            Err(e) => Outcome::LookupFailed {
                metadata,
                coordinate,
                error: e.to_string(),
            },
        }
    }

    /// Walk `root` and process every file in turn.
    ///
    /// Each report goes to `reporter` as soon as its file is done. A quota
    /// answer from the place service ends the walk before the next entry is
    /// read, and the summary's status becomes [`RunStatus::QuotaExceeded`].
    pub async fn run(&self, root: &Path, reporter: &mut dyn Reporter) -> RunSummary {
        let mut summary = RunSummary::default();

        for entry in discover::discover(root) {
            let report = match entry {
                Ok(path) => {
                    let outcome = self.process_file(&path).await;
                    FileReport {
                        kind: ImageKind::from_path(&path),
                        path: Some(path),
                        outcome,
                    }
                }
                Err(e) => FileReport {
                    path: e.path().map(Path::to_path_buf),
                    kind: None,
                    outcome: Outcome::WalkFailed {
                        error: e.to_string(),
                    },
                },
            };

            reporter.report(&report);
            let halt = report.outcome.is_quota_exceeded();
            summary.record(report);

            if halt {
                summary.status = RunStatus::QuotaExceeded;
                break;
            }
        }

        summary
    }
}

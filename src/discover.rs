//! Directory walking and image classification.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The image type of a file, determined by its extension alone.
///
/// # Example
///
/// ```rust
/// use photo_places::discover::ImageKind;
/// use std::path::Path;
///
/// assert_eq!(ImageKind::from_path(Path::new("IMG_0042.JPG")), Some(ImageKind::Jpeg));
/// assert_eq!(ImageKind::from_path(Path::new("notes.txt")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Png,
    Bmp,
}

impl ImageKind {
    /// Determine the image kind from a file path extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }
}

/// Check if a file has an allow-listed image extension.
pub fn is_image(path: &Path) -> bool {
    ImageKind::from_path(path).is_some()
}

/// Lazily walk `root` and yield every entry that is not a directory.
///
/// Hidden entries are included and symlinks are not followed. Siblings are
/// visited in file-name order. An unreadable entry is yielded as an `Err`
/// and the walk carries on with the rest of the tree.
///
/// # Example
///
/// ```rust,no_run
/// use photo_places::discover::{discover, is_image};
///
/// for entry in discover("./photos".as_ref()) {
///     match entry {
///         Ok(path) if is_image(&path) => println!("{}", path.display()),
///         Ok(_) => {}
///         Err(e) => eprintln!("skipping: {e}"),
///     }
/// }
/// ```
pub fn discover(root: &Path) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_dir() => None,
            Ok(e) => Some(Ok(e.into_path())),
            Err(e) => Some(Err(e)),
        })
}

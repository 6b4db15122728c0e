// Filesystem reference store: writes markdown references under
// `<root>/references[/<subdir>]` and images under `<root>/images`. The root
// is the working directory in the binary and a temp dir in tests.

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::ui;

const REFERENCES_DIR: &str = "references";
const IMAGES_DIR: &str = "images";
const SLUG_MAX_LEN: usize = 50;

/// Writes command artifacts below a fixed root directory.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    root: PathBuf,
}

impl ReferenceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ReferenceStore { root: root.into() }
    }

    /// Store rooted at the process working directory.
    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Write UTF-8 `content` to `references/<subdir>/<filename>`, replacing
    /// any existing file, and return the full path.
    pub fn save_reference(
        &self,
        filename: &str,
        content: &str,
        subdir: Option<&str>,
    ) -> io::Result<PathBuf> {
        let dir = self.root.join(REFERENCES_DIR).join(subdir.unwrap_or(""));
        ensure_directory(&dir)?;

        let path = dir.join(filename);
        fs::write(&path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "reference written");
        ui::success(&format!("Saved: {}", path.display()));
        Ok(path)
    }

    /// Write raw image bytes to `images/<filename>` and return the full path.
    pub fn save_image(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let dir = self.root.join(IMAGES_DIR);
        ensure_directory(&dir)?;

        let path = dir.join(filename);
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "image written");
        ui::success(&format!("Image saved: {}", path.display()));
        Ok(path)
    }
}

/// Create `dir` and any missing parents.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Current UTC time as `YYYY-MM-DDTHH-MM-SS`.
pub fn timestamp() -> String {
    timestamp_at(Utc::now())
}

/// ISO-8601 at seconds precision with `:` replaced by `-` and no zone suffix.
pub fn timestamp_at(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Lower-case `input`, collapse each run of non-alphanumerics into one `-`,
/// and cut to 50 characters without leading or trailing `-`.
pub fn sanitize_filename(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(SLUG_MAX_LEN);
    // truncation can leave a dangling separator
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

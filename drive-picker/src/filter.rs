//! MIME type filtering

use drive_api::DriveFile;
use serde::{Deserialize, Serialize};

/// Substring-based MIME filter
///
/// A file passes when its MIME type contains any of the allowed substrings.
/// Folders always pass so navigation stays possible regardless of filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeFilter {
    allowed: Vec<String>,
}

impl MimeFilter {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    pub fn matches(&self, file: &DriveFile) -> bool {
        file.is_folder
            || self
                .allowed
                .iter()
                .any(|fragment| file.mime_type.contains(fragment.as_str()))
    }
}

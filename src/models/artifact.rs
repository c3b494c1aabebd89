use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output file produced by a capture session.
///
/// The path is reserved before the hardware device is armed, so a failed arm
/// still leaves a deterministic path for diagnostics. `size_bytes` is only
/// meaningful after `stop` completes and the file is flushed. The file itself
/// outlives the session; the manager does not own it after handoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl OutputArtifact {
    pub fn size_class(&self) -> ArtifactSizeClass {
        ArtifactSizeClass::classify(self.size_bytes)
    }
}

/// Diagnostic classification of an artifact's final size.
///
/// Purely informational: it changes log output, never the stop result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSizeClass {
    /// Zero bytes — the encoder wrote nothing.
    Empty,
    /// Under 1000 bytes — likely header-only, no usable audio.
    SuspiciouslySmall,
    Normal,
}

impl ArtifactSizeClass {
    pub fn classify(size_bytes: u64) -> Self {
        match size_bytes {
            0 => Self::Empty,
            1..=999 => Self::SuspiciouslySmall,
            _ => Self::Normal,
        }
    }
}

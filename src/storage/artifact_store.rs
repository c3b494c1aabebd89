use std::fs;
use std::path::PathBuf;

use crate::models::artifact::ArtifactSizeClass;
use crate::models::profile::SessionConfig;

/// Reserve a fresh, uniquely named artifact path in the configured cache
/// directory.
///
/// Creates the directory if missing. The file itself is not created here;
/// the capture device creates it when armed. A v4 UUID keeps names
/// collision-resistant across restarts without any persisted counter.
pub fn reserve_artifact_path(config: &SessionConfig) -> Result<PathBuf, String> {
    fs::create_dir_all(&config.cache_dir)
        .map_err(|e| format!("failed to create cache dir {}: {}", config.cache_dir.display(), e))?;

    let file_name = format!(
        "{}{}.{}",
        config.file_prefix,
        uuid::Uuid::new_v4(),
        config.profile.file_extension()
    );
    Ok(config.cache_dir.join(file_name))
}

/// Read the artifact's final size from the file system.
///
/// A missing file reads as zero bytes; the caller decides what that means.
pub fn artifact_size(path: &std::path::Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Log a diagnostic line for the artifact's size class.
///
/// Classification never changes the stop result.
pub fn log_size_class(path: &std::path::Path, size_bytes: u64) {
    match ArtifactSizeClass::classify(size_bytes) {
        ArtifactSizeClass::Empty => {
            log::error!("artifact {} is empty (0 bytes)", path.display());
        }
        ArtifactSizeClass::SuspiciouslySmall => {
            log::warn!("artifact {} is very small ({} bytes)", path.display(), size_bytes);
        }
        ArtifactSizeClass::Normal => {
            log::debug!("artifact {} finalized ({} bytes)", path.display(), size_bytes);
        }
    }
}

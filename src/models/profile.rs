use std::path::PathBuf;

/// Fixed encoding profile for capture artifacts.
///
/// Values are constants, not negotiated: one container, one codec, one bit
/// rate, one sample rate. `Default` is the only profile the system ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingProfile {
    /// Container format (MPEG-4).
    pub container: Container,

    /// Audio codec (AAC).
    pub codec: Codec,

    /// Encoding bit rate in bits per second.
    pub bit_rate: u32,

    /// Sample rate in Hz.
    pub sample_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Mpeg4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Aac,
}

impl EncodingProfile {
    /// File extension matching the container.
    pub fn file_extension(&self) -> &'static str {
        match self.container {
            Container::Mpeg4 => "m4a",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bit_rate == 0 {
            return Err("bit rate must be positive".into());
        }
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        Ok(())
    }
}

impl Default for EncodingProfile {
    fn default() -> Self {
        Self {
            container: Container::Mpeg4,
            codec: Codec::Aac,
            bit_rate: 128_000,
            sample_rate: 44_100,
        }
    }
}

/// Configuration for a `CaptureSessionManager` instance.
///
/// The two call sites (long-running host, bound command handler) share one
/// manager type and differ only in cache placement and file naming, so both
/// are expressed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Process-scoped cache directory where artifacts are written.
    /// Created on first use if missing.
    pub cache_dir: PathBuf,

    /// Prefix for artifact file names; a v4 UUID and the profile's
    /// extension are appended.
    pub file_prefix: String,

    /// Encoding profile applied to every session.
    pub profile: EncodingProfile,
}

impl SessionConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            file_prefix: "recording_".into(),
            profile: EncodingProfile::default(),
        }
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }
}

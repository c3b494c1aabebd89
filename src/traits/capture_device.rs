use std::path::Path;

use crate::models::error::{AcquireError, ArmError, FinalizeError, ReleaseError};
use crate::models::profile::EncodingProfile;

/// Handle over the platform's hardware audio-capture primitive.
///
/// Implemented by platform adapter crates. Exactly one device may be armed
/// per process; `CaptureSessionManager` owns the handle exclusively and no
/// other component may hold a reference to it.
///
/// Lifecycle: acquired via `CaptureDeviceProvider::acquire`, then
/// `arm` → (recording) → `finalize` → `release`. `release` must be safe to
/// call in any state — it is the unconditional cleanup step.
pub trait CaptureDevice: Send {
    /// Configure the device with the fixed encoding profile and start
    /// writing to `output`. Synchronous and short; failure means the
    /// platform rejected the configuration.
    fn arm(&mut self, profile: &EncodingProfile, output: &Path) -> Result<(), ArmError>;

    /// Stop capturing and flush the output file.
    fn finalize(&mut self) -> Result<(), FinalizeError>;

    /// Release the underlying hardware resource.
    fn release(&mut self) -> Result<(), ReleaseError>;
}

/// Factory for capture devices.
///
/// Acquisition is the step that can fail when the hardware is held by
/// another process; it is separate from `arm` so the manager can roll back
/// a device that was acquired but never armed.
pub trait CaptureDeviceProvider: Send {
    type Device: CaptureDevice;

    fn acquire(&self) -> Result<Self::Device, AcquireError>;
}

use thiserror::Error;

/// The hardware capture device could not be acquired, typically because
/// another process already holds it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to acquire capture device: {0}")]
pub struct AcquireError(pub String);

/// The platform rejected the capture configuration at prepare time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to arm capture device: {0}")]
pub struct ArmError(pub String);

/// The device rejected the finalize call, e.g. stop while not armed.
///
/// Logged on the stop path; only surfaced when no artifact file exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to finalize capture: {0}")]
pub struct FinalizeError(pub String);

/// Releasing the device itself failed. Always logged, never surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to release capture device: {0}")]
pub struct ReleaseError(pub String);

/// Any failure while locating or mutating a compositor surface.
///
/// Fully contained inside the router: logged and discarded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    #[error("surface registry unavailable: {0}")]
    RegistryUnavailable(String),

    #[error("no overlay-type surface registered")]
    NoOverlaySurface,

    #[error("surface layout update rejected: {0}")]
    UpdateRejected(String),
}

/// Errors surfaced by `CaptureSessionManager::start`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    #[error(transparent)]
    Arm(#[from] ArmError),

    #[error("failed to reserve artifact path: {0}")]
    ReservePath(String),
}

/// Errors surfaced by `CaptureSessionManager::stop`.
///
/// Finalize failures only reach the caller when the session produced no
/// artifact file; otherwise they are logged and the artifact wins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StopError {
    #[error("capture produced no artifact: {0}")]
    NoArtifact(#[from] FinalizeError),
}

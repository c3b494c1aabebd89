use std::fs;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::models::artifact::OutputArtifact;
use crate::models::error::{StartError, StopError};
use crate::models::profile::SessionConfig;
use crate::models::state::SessionState;
use crate::storage::artifact_store;
use crate::traits::capture_device::{CaptureDevice, CaptureDeviceProvider};
use crate::traits::session_host::SessionHost;

/// Internal mutable session state, protected by `parking_lot::Mutex`.
///
/// At most one device is ever held here; holding the lock across the whole
/// start/stop path is what serializes interleaved calls from the two entry
/// points (long-running host and bound command handler).
struct Inner<D> {
    state: SessionState,
    device: Option<D>,
    artifact: Option<OutputArtifact>,
    started_at: Option<Instant>,
}

impl<D> Inner<D> {
    fn new() -> Self {
        Self {
            state: SessionState::Idle,
            device: None,
            artifact: None,
            started_at: None,
        }
    }
}

/// Owner of the process's single capture session.
///
/// Generic over the platform capture backend via `CaptureDeviceProvider`.
/// Both external entry points share one instance; the manager is the only
/// component allowed to hold the hardware device handle.
///
/// ```text
/// idle --start()--> preparing --(arm ok)--> active --stop()--> stopping --> idle
///                        └--(arm fails)--> failed --(release)--> idle
/// ```
pub struct CaptureSessionManager<P: CaptureDeviceProvider> {
    provider: P,
    config: SessionConfig,
    host: Option<Arc<dyn SessionHost>>,
    inner: Mutex<Inner<P::Device>>,
}

impl<P: CaptureDeviceProvider> CaptureSessionManager<P> {
    pub fn new(provider: P, config: SessionConfig) -> Self {
        debug_assert!(config.profile.validate().is_ok(), "invalid encoding profile");
        Self {
            provider,
            config,
            host: None,
            inner: Mutex::new(Inner::new()),
        }
    }

    /// Attach the keep-alive host delegate. Call before sharing the manager.
    pub fn set_host(&mut self, host: Arc<dyn SessionHost>) {
        self.host = Some(host);
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    /// Whether a session is currently preparing or active. Pure query.
    pub fn is_active(&self) -> bool {
        self.inner.lock().state.is_active()
    }

    /// Start a new capture session and return its reserved artifact.
    ///
    /// If a session is already preparing or active it is first stopped
    /// best-effort (takeover semantics — errors logged, not surfaced). The
    /// artifact path is reserved before the device is armed, so a failed
    /// arm still leaves a deterministic path in the logs. Acquire/arm
    /// failures roll back fully and are returned; there is no retry.
    pub fn start(&self) -> Result<OutputArtifact, StartError> {
        let mut inner = self.inner.lock();

        if inner.state.is_active() {
            log::warn!("session already active, stopping previous session before takeover");
            if let Err(e) = self.stop_locked(&mut inner, true) {
                log::error!("teardown of previous session failed: {}", e);
            }
        }

        inner.state = SessionState::Preparing;

        let path = match artifact_store::reserve_artifact_path(&self.config) {
            Ok(path) => path,
            Err(e) => {
                inner.state = SessionState::Idle;
                return Err(StartError::ReservePath(e));
            }
        };
        let artifact = OutputArtifact {
            path: path.clone(),
            size_bytes: 0,
            created_at: chrono::Utc::now(),
        };
        log::debug!("starting capture session, artifact reserved at {}", path.display());

        let mut device = match self.provider.acquire() {
            Ok(device) => device,
            Err(e) => {
                log::error!("capture device acquisition failed for {}: {}", path.display(), e);
                // Nothing was acquired, so rollback is just the state reset.
                inner.state = SessionState::Idle;
                return Err(e.into());
            }
        };

        if let Err(e) = device.arm(&self.config.profile, &path) {
            log::error!("arming capture device failed for {}: {}", path.display(), e);
            inner.state = SessionState::Failed;
            if let Err(release_err) = device.release() {
                log::warn!("releasing capture device after failed arm: {}", release_err);
            }
            inner.state = SessionState::Idle;
            return Err(e.into());
        }

        inner.device = Some(device);
        inner.artifact = Some(artifact.clone());
        inner.started_at = Some(Instant::now());
        inner.state = SessionState::Active;

        if let Some(ref host) = self.host {
            host.on_session_started(&artifact);
        }

        Ok(artifact)
    }

    /// Stop the current session and hand the artifact to the caller.
    ///
    /// A no-op when no session is active: returns `Ok(None)` without
    /// touching the device. Finalize failures are logged and only surfaced
    /// when the session left no artifact file behind; release always runs
    /// and its failures are swallowed.
    pub fn stop(&self) -> Result<Option<OutputArtifact>, StopError> {
        let mut inner = self.inner.lock();

        if !inner.state.is_active() {
            log::debug!("stop requested with no active session");
            return Ok(None);
        }

        self.stop_locked(&mut inner, false)
    }

    /// Shared stop path for `stop()` and the takeover in `start()`.
    ///
    /// `abandoned` marks a takeover teardown: the artifact has no caller,
    /// and if the session captured nothing the empty file is removed so a
    /// taken-over session leaves no garbage in the cache.
    fn stop_locked(
        &self,
        inner: &mut Inner<P::Device>,
        abandoned: bool,
    ) -> Result<Option<OutputArtifact>, StopError> {
        inner.state = SessionState::Stopping;

        let device = inner.device.take();
        let artifact = inner.artifact.take();
        if let Some(started_at) = inner.started_at.take() {
            log::debug!("capture session ran for {:.1}s", started_at.elapsed().as_secs_f64());
        }

        let mut finalize_failure = None;
        if let Some(mut device) = device {
            if let Err(e) = device.finalize() {
                log::error!("finalizing capture failed: {}", e);
                finalize_failure = Some(e);
            }
            // Release runs unconditionally, even when finalize failed.
            if let Err(e) = device.release() {
                log::warn!("releasing capture device failed: {}", e);
            }
        }

        inner.state = SessionState::Idle;

        if let Some(ref host) = self.host {
            host.on_session_ended();
        }

        let Some(mut artifact) = artifact else {
            return Ok(None);
        };

        artifact.size_bytes = artifact_store::artifact_size(&artifact.path);
        artifact_store::log_size_class(&artifact.path, artifact.size_bytes);

        if abandoned && artifact.size_bytes == 0 {
            if fs::remove_file(&artifact.path).is_ok() {
                log::debug!("removed empty abandoned artifact {}", artifact.path.display());
            }
            return Ok(None);
        }

        match finalize_failure {
            Some(e) if !artifact.path.exists() => Err(StopError::NoArtifact(e)),
            _ => Ok(Some(artifact)),
        }
    }
}

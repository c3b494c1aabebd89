//! Named-command surface for the external dispatcher.
//!
//! The dispatcher itself (request/response transport) is an external
//! collaborator; this module only maps command names onto the session
//! manager and the input router and shapes serializable results.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::models::error::{StartError, StopError};
use crate::routing::router::OverlayInputRouter;
use crate::session::manager::CaptureSessionManager;
use crate::traits::capture_device::CaptureDeviceProvider;
use crate::traits::scheduler::TaskScheduler;
use crate::traits::surface_registry::SurfaceRegistry;

/// Commands understood by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartCapture,
    StopCapture,
    QueryActive,
    EnablePassThrough,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start-capture" => Some(Self::StartCapture),
            "stop-capture" => Some(Self::StopCapture),
            "query-active" => Some(Self::QueryActive),
            "enable-pass-through" => Some(Self::EnablePassThrough),
            _ => None,
        }
    }
}

/// Successful command result, serializable for the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Artifact path for start/stop; `None` when stop had nothing to do.
    ArtifactPath { path: Option<String> },
    Active { active: bool },
    Ack,
}

/// Command failure with a stable wire code.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{code}: {message}")]
pub struct CommandError {
    pub code: &'static str,
    pub message: String,
}

pub const CODE_ACQUIRE_FAILED: &str = "ACQUIRE_FAILED";
pub const CODE_ARM_FAILED: &str = "ARM_FAILED";
pub const CODE_STOP_ERROR: &str = "STOP_ERROR";
pub const CODE_NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";

impl From<StartError> for CommandError {
    fn from(e: StartError) -> Self {
        let code = match e {
            StartError::Arm(_) => CODE_ARM_FAILED,
            StartError::Acquire(_) | StartError::ReservePath(_) => CODE_ACQUIRE_FAILED,
        };
        Self { code, message: e.to_string() }
    }
}

impl From<StopError> for CommandError {
    fn from(e: StopError) -> Self {
        Self {
            code: CODE_STOP_ERROR,
            message: e.to_string(),
        }
    }
}

/// Routes inbound named commands to the capture manager and the router.
///
/// Shares the one `CaptureSessionManager` with the long-running host; this
/// handler adds no lifecycle logic of its own.
pub struct CommandHandler<P, R, S>
where
    P: CaptureDeviceProvider,
    R: SurfaceRegistry + 'static,
    S: TaskScheduler,
{
    manager: Arc<CaptureSessionManager<P>>,
    router: OverlayInputRouter<R, S>,
}

impl<P, R, S> CommandHandler<P, R, S>
where
    P: CaptureDeviceProvider,
    R: SurfaceRegistry + 'static,
    S: TaskScheduler,
{
    pub fn new(manager: Arc<CaptureSessionManager<P>>, router: OverlayInputRouter<R, S>) -> Self {
        Self { manager, router }
    }

    pub fn handle(&self, name: &str) -> Result<CommandOutcome, CommandError> {
        let Some(command) = Command::parse(name) else {
            return Err(CommandError {
                code: CODE_NOT_IMPLEMENTED,
                message: format!("unknown command: {}", name),
            });
        };

        match command {
            Command::StartCapture => {
                let artifact = self.manager.start()?;
                Ok(CommandOutcome::ArtifactPath {
                    path: Some(artifact.path.to_string_lossy().into_owned()),
                })
            }
            Command::StopCapture => {
                let artifact = self.manager.stop()?;
                Ok(CommandOutcome::ArtifactPath {
                    path: artifact.map(|a| a.path.to_string_lossy().into_owned()),
                })
            }
            Command::QueryActive => Ok(CommandOutcome::Active {
                active: self.manager.is_active(),
            }),
            Command::EnablePassThrough => {
                // Fire-and-forget; failures are contained in the router.
                self.router.enable_pass_through();
                Ok(CommandOutcome::Ack)
            }
        }
    }

    /// Handle a command and serialize the outcome for the transport.
    pub fn handle_json(&self, name: &str) -> serde_json::Value {
        match self.handle(name) {
            Ok(outcome) => serde_json::to_value(&outcome).unwrap_or(serde_json::Value::Null),
            Err(e) => serde_json::json!({ "error": e }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use parking_lot::Mutex;

    use crate::models::error::{
        AcquireError, ArmError, FinalizeError, IntrospectionError, ReleaseError,
    };
    use crate::models::profile::{EncodingProfile, SessionConfig};
    use crate::models::surface::SurfaceDescriptor;
    use crate::traits::capture_device::CaptureDevice;
    use crate::traits::scheduler::ScheduledTask;

    struct StubDevice {
        fail_arm: Arc<AtomicBool>,
    }

    impl CaptureDevice for StubDevice {
        fn arm(&mut self, _profile: &EncodingProfile, output: &Path) -> Result<(), ArmError> {
            if self.fail_arm.load(Ordering::SeqCst) {
                return Err(ArmError("bad parameters".into()));
            }
            fs::write(output, vec![0u8; 2048]).map_err(|e| ArmError(e.to_string()))
        }
        fn finalize(&mut self) -> Result<(), FinalizeError> {
            Ok(())
        }
        fn release(&mut self) -> Result<(), ReleaseError> {
            Ok(())
        }
    }

    struct StubProvider {
        fail_arm: Arc<AtomicBool>,
    }

    impl CaptureDeviceProvider for StubProvider {
        type Device = StubDevice;

        fn acquire(&self) -> Result<StubDevice, AcquireError> {
            Ok(StubDevice {
                fail_arm: Arc::clone(&self.fail_arm),
            })
        }
    }

    #[derive(Default)]
    struct EmptyRegistry {
        enumerated: Mutex<usize>,
    }

    impl SurfaceRegistry for EmptyRegistry {
        fn enumerate(&self) -> Result<Vec<SurfaceDescriptor>, IntrospectionError> {
            *self.enumerated.lock() += 1;
            Ok(Vec::new())
        }
        fn update_input_flags(&self, _id: u64, _flags: u32) -> Result<(), IntrospectionError> {
            Ok(())
        }
    }

    struct InlineScheduler;

    impl TaskScheduler for InlineScheduler {
        fn schedule(&self, _delay: Duration, task: ScheduledTask) {
            task();
        }
    }

    struct TestRig {
        handler: CommandHandler<StubProvider, EmptyRegistry, InlineScheduler>,
        registry: Arc<EmptyRegistry>,
        fail_arm: Arc<AtomicBool>,
        dir: PathBuf,
    }

    fn handler_with(sub: &str) -> TestRig {
        let dir = std::env::temp_dir().join(format!("overlay_capture_cmd_{}", sub));
        fs::remove_dir_all(&dir).ok();

        let fail_arm = Arc::new(AtomicBool::new(false));
        let provider = StubProvider { fail_arm: Arc::clone(&fail_arm) };
        let manager = Arc::new(CaptureSessionManager::new(provider, SessionConfig::new(&dir)));
        let registry = Arc::new(EmptyRegistry::default());
        let router = OverlayInputRouter::new(Arc::clone(&registry), InlineScheduler);

        TestRig {
            handler: CommandHandler::new(manager, router),
            registry,
            fail_arm,
            dir,
        }
    }

    #[test]
    fn start_and_stop_round_trip() {
        let rig = handler_with("round_trip");

        let started = rig.handler.handle("start-capture").unwrap();
        let CommandOutcome::ArtifactPath { path: Some(path) } = started else {
            panic!("expected a path, got {:?}", started);
        };
        assert!(path.ends_with(".m4a"));

        assert_eq!(
            rig.handler.handle("query-active").unwrap(),
            CommandOutcome::Active { active: true }
        );

        let stopped = rig.handler.handle("stop-capture").unwrap();
        assert_eq!(stopped, CommandOutcome::ArtifactPath { path: Some(path) });

        fs::remove_dir_all(&rig.dir).ok();
    }

    #[test]
    fn stop_without_session_returns_empty() {
        let rig = handler_with("empty_stop");

        assert_eq!(
            rig.handler.handle("stop-capture").unwrap(),
            CommandOutcome::ArtifactPath { path: None }
        );

        fs::remove_dir_all(&rig.dir).ok();
    }

    #[test]
    fn arm_failure_maps_to_wire_code() {
        let rig = handler_with("arm_code");
        rig.fail_arm.store(true, Ordering::SeqCst);

        let err = rig.handler.handle("start-capture").unwrap_err();
        assert_eq!(err.code, CODE_ARM_FAILED);

        fs::remove_dir_all(&rig.dir).ok();
    }

    #[test]
    fn unknown_command_is_not_implemented() {
        let rig = handler_with("unknown");

        let err = rig.handler.handle("pause-capture").unwrap_err();
        assert_eq!(err.code, CODE_NOT_IMPLEMENTED);

        fs::remove_dir_all(&rig.dir).ok();
    }

    #[test]
    fn enable_pass_through_acknowledges_and_scans() {
        let rig = handler_with("pass_through");

        // No overlay surface registered: still acknowledged, errors stay
        // inside the router.
        assert_eq!(rig.handler.handle("enable-pass-through").unwrap(), CommandOutcome::Ack);
        assert_eq!(*rig.registry.enumerated.lock(), 1);

        fs::remove_dir_all(&rig.dir).ok();
    }

    #[test]
    fn json_responses_have_stable_shape() {
        let rig = handler_with("json");

        let active = rig.handler.handle_json("query-active");
        assert_eq!(active, serde_json::json!({ "active": { "active": false } }));

        let err = rig.handler.handle_json("bogus");
        assert_eq!(err["error"]["code"], "NOT_IMPLEMENTED");

        fs::remove_dir_all(&rig.dir).ok();
    }
}

//! # overlay-capture-core
//!
//! Platform-agnostic core for the assistant overlay's device access.
//!
//! Provides the capture-session lifecycle (exclusive, restartable
//! microphone sessions that survive while the UI is backgrounded) and the
//! overlay input-routing patch (pass touches over transparent pixels
//! through to whatever is beneath the overlay). Platform adapters implement
//! the `CaptureDevice`/`CaptureDeviceProvider` and `SurfaceRegistry` traits
//! and plug into the generic manager and router.
//!
//! ## Architecture
//!
//! ```text
//! overlay-capture-core (this crate)
//! ├── traits/    ← CaptureDevice, CaptureDeviceProvider, SurfaceRegistry,
//! │                TaskScheduler, SessionHost
//! ├── models/    ← SessionState, errors, EncodingProfile, OutputArtifact,
//! │                SurfaceDescriptor
//! ├── session/   ← CaptureSessionManager (generic orchestrator)
//! ├── routing/   ← OverlayInputRouter, ThreadScheduler
//! ├── storage/   ← artifact path reservation and size diagnostics
//! └── commands/  ← named-command handler for the dispatcher
//! ```
//!
//! Both external entry points — the long-running session host and the bound
//! command handler — share one `CaptureSessionManager`; it is the only
//! owner of the hardware capture device. The router is an independent
//! subsystem with no ordering relationship to session management.

pub mod commands;
pub mod models;
pub mod routing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use commands::{Command, CommandError, CommandHandler, CommandOutcome};
pub use models::artifact::{ArtifactSizeClass, OutputArtifact};
pub use models::error::{
    AcquireError, ArmError, FinalizeError, IntrospectionError, ReleaseError, StartError, StopError,
};
pub use models::profile::{EncodingProfile, SessionConfig};
pub use models::state::SessionState;
pub use models::surface::{SurfaceDescriptor, INPUT_FLAG_PASS_THROUGH, SURFACE_TYPE_OVERLAY};
pub use routing::router::{OverlayInputRouter, DEFAULT_PATCH_DELAY};
pub use routing::scheduler::ThreadScheduler;
pub use session::manager::CaptureSessionManager;
pub use traits::capture_device::{CaptureDevice, CaptureDeviceProvider};
pub use traits::scheduler::{ScheduledTask, TaskScheduler};
pub use traits::session_host::SessionHost;
pub use traits::surface_registry::SurfaceRegistry;

use crate::models::error::IntrospectionError;
use crate::models::surface::SurfaceDescriptor;

/// Access to the compositor's surface registry for the current process.
///
/// The compositor exposes no public enumeration API, so the production
/// adapter reaches into private subsystem state (reflective/low-level
/// access against one specific internal layout). Everything fragile lives
/// behind this port; the router is platform-agnostic and testable with a
/// fake registry.
pub trait SurfaceRegistry: Send + Sync {
    /// Enumerate all surfaces currently registered by this process.
    ///
    /// The result is a snapshot: the live set may change before a
    /// subsequent `update_input_flags` call, and the registry must not be
    /// assumed exclusively held.
    fn enumerate(&self) -> Result<Vec<SurfaceDescriptor>, IntrospectionError>;

    /// Write a new input-flag bitmask for one surface through the
    /// compositor's public update-layout entry point.
    fn update_input_flags(&self, surface_id: u64, input_flags: u32) -> Result<(), IntrospectionError>;
}

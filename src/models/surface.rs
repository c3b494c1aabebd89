use serde::{Deserialize, Serialize};

/// Surface type value the compositor assigns to overlay-type surfaces —
/// surfaces that render above all other application content, including
/// outside the app's own window bounds.
pub const SURFACE_TYPE_OVERLAY: u32 = 2038;

/// Input-routing bit that makes touches over transparent pixels fall
/// through to whatever is beneath the surface instead of being consumed.
pub const INPUT_FLAG_PASS_THROUGH: u32 = 0x0000_0020;

/// Snapshot of one compositor surface registered by this process.
///
/// Foreign mutable state: read transiently from the compositor's registry
/// and written back through its update entry point. The set of live surfaces
/// may change between enumeration and write-back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    pub surface_id: u64,
    pub surface_type: u32,
    pub input_flags: u32,
}

impl SurfaceDescriptor {
    pub fn is_overlay(&self) -> bool {
        self.surface_type == SURFACE_TYPE_OVERLAY
    }

    pub fn has_pass_through(&self) -> bool {
        self.input_flags & INPUT_FLAG_PASS_THROUGH != 0
    }
}

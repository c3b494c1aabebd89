/// Capture session state machine.
///
/// State transitions:
/// ```text
/// idle → preparing → active → stopping → idle
///            ↓
///         failed → idle   (rollback after a failed acquire/arm)
/// ```
///
/// `failed` is transient for the process: rollback releases whatever was
/// acquired and lands back in `idle`, and the next `start()` clears any
/// leftover session via the takeover path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Preparing,
    Active,
    Stopping,
    Failed,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while a hardware device is (or is about to be) armed.
    ///
    /// `Preparing` counts: the device may already be acquired, so a second
    /// session must not be admitted alongside it.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Preparing | Self::Active)
    }
}

use crate::models::artifact::OutputArtifact;

/// Delegate that keeps the owning process alive while a session runs.
///
/// The host must stay alive and visible to the OS scheduler for the whole
/// session (the UI may be backgrounded) and may shut down again on session
/// end. Called synchronously from inside the manager's lock — keep
/// implementations short.
pub trait SessionHost: Send + Sync {
    /// Called when a session reaches `Active`.
    fn on_session_started(&self, artifact: &OutputArtifact);

    /// Called when a previously started session ends, whether through
    /// `stop` or takeover teardown. A start that fails before reaching
    /// `Active` fires neither hook.
    fn on_session_ended(&self);
}

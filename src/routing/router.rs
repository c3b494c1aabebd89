use std::sync::Arc;
use std::time::Duration;

use crate::models::error::IntrospectionError;
use crate::models::surface::INPUT_FLAG_PASS_THROUGH;
use crate::traits::scheduler::TaskScheduler;
use crate::traits::surface_registry::SurfaceRegistry;

/// Delay before the surface scan runs, giving the compositor time to
/// finish creating the overlay surface. A race-avoidance heuristic, not a
/// guarantee.
pub const DEFAULT_PATCH_DELAY: Duration = Duration::from_millis(1000);

/// Enables input pass-through on the process's overlay surface.
///
/// Best-effort by contract: `enable_pass_through` reports nothing back, and
/// every introspection failure is logged and discarded. The feature
/// degrades to "no pass-through" rather than disturbing the host.
pub struct OverlayInputRouter<R: SurfaceRegistry + 'static, S: TaskScheduler> {
    registry: Arc<R>,
    scheduler: S,
    delay: Duration,
}

impl<R: SurfaceRegistry + 'static, S: TaskScheduler> OverlayInputRouter<R, S> {
    pub fn new(registry: Arc<R>, scheduler: S) -> Self {
        Self {
            registry,
            scheduler,
            delay: DEFAULT_PATCH_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Schedule the one-shot pass-through patch. Fire-and-forget: the
    /// caller gets no result channel and no cancellation hook.
    pub fn enable_pass_through(&self) {
        let registry = Arc::clone(&self.registry);
        self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                if let Err(e) = patch_first_overlay(registry.as_ref()) {
                    log::warn!("overlay pass-through patch skipped: {}", e);
                }
            }),
        );
    }
}

/// Scan the surface registry and set the pass-through bit on the first
/// overlay-type surface found.
///
/// Scanning stops at the first match; any further overlay-type surfaces
/// are left untouched. The enumeration is a snapshot, so the write-back
/// may race surface teardown — the registry rejects that and the error is
/// handled like any other introspection failure.
pub fn patch_first_overlay(registry: &dyn SurfaceRegistry) -> Result<(), IntrospectionError> {
    let surfaces = registry.enumerate()?;
    log::debug!("scanning {} registered surfaces for the overlay", surfaces.len());

    for surface in surfaces {
        if !surface.is_overlay() {
            continue;
        }
        let new_flags = surface.input_flags | INPUT_FLAG_PASS_THROUGH;
        registry.update_input_flags(surface.surface_id, new_flags)?;
        log::debug!(
            "patched overlay surface {}: input flags {:#010x} -> {:#010x}",
            surface.surface_id,
            surface.input_flags,
            new_flags
        );
        return Ok(());
    }

    Err(IntrospectionError::NoOverlaySurface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    use crate::models::surface::{SurfaceDescriptor, SURFACE_TYPE_OVERLAY};

    /// Scheduler that runs the task inline, ignoring the delay.
    struct InlineScheduler;

    impl TaskScheduler for InlineScheduler {
        fn schedule(&self, _delay: Duration, task: crate::traits::scheduler::ScheduledTask) {
            task();
        }
    }

    #[derive(Default)]
    struct FakeRegistry {
        surfaces: Mutex<Vec<SurfaceDescriptor>>,
        fail_enumerate: bool,
        fail_update: bool,
        updates: Mutex<Vec<(u64, u32)>>,
    }

    impl FakeRegistry {
        fn with_surfaces(surfaces: Vec<SurfaceDescriptor>) -> Self {
            Self {
                surfaces: Mutex::new(surfaces),
                ..Default::default()
            }
        }
    }

    impl SurfaceRegistry for FakeRegistry {
        fn enumerate(&self) -> Result<Vec<SurfaceDescriptor>, IntrospectionError> {
            if self.fail_enumerate {
                return Err(IntrospectionError::RegistryUnavailable("no registry class".into()));
            }
            Ok(self.surfaces.lock().clone())
        }

        fn update_input_flags(&self, surface_id: u64, input_flags: u32) -> Result<(), IntrospectionError> {
            if self.fail_update {
                return Err(IntrospectionError::UpdateRejected("surface gone".into()));
            }
            self.updates.lock().push((surface_id, input_flags));
            let mut surfaces = self.surfaces.lock();
            if let Some(s) = surfaces.iter_mut().find(|s| s.surface_id == surface_id) {
                s.input_flags = input_flags;
            }
            Ok(())
        }
    }

    fn overlay(id: u64, flags: u32) -> SurfaceDescriptor {
        SurfaceDescriptor {
            surface_id: id,
            surface_type: SURFACE_TYPE_OVERLAY,
            input_flags: flags,
        }
    }

    fn plain(id: u64) -> SurfaceDescriptor {
        SurfaceDescriptor {
            surface_id: id,
            surface_type: 1,
            input_flags: 0x100,
        }
    }

    #[test]
    fn patches_first_overlay_and_preserves_existing_flags() {
        let registry = FakeRegistry::with_surfaces(vec![plain(1), overlay(2, 0x518)]);

        patch_first_overlay(&registry).unwrap();

        let updates = registry.updates.lock();
        assert_eq!(updates.as_slice(), &[(2, 0x518 | INPUT_FLAG_PASS_THROUGH)]);
    }

    #[test]
    fn second_overlay_surface_is_left_untouched() {
        let registry = FakeRegistry::with_surfaces(vec![overlay(1, 0), overlay(2, 0)]);

        patch_first_overlay(&registry).unwrap();

        assert_eq!(registry.updates.lock().len(), 1);
        let surfaces = registry.surfaces.lock();
        assert!(surfaces[0].has_pass_through());
        assert!(!surfaces[1].has_pass_through());
    }

    #[test]
    fn non_overlay_surfaces_are_never_mutated() {
        let registry = FakeRegistry::with_surfaces(vec![plain(1), plain(2)]);

        let err = patch_first_overlay(&registry).unwrap_err();
        assert_eq!(err, IntrospectionError::NoOverlaySurface);
        assert!(registry.updates.lock().is_empty());
    }

    #[test]
    fn enable_pass_through_swallows_missing_overlay() {
        let registry = Arc::new(FakeRegistry::default());
        let router = OverlayInputRouter::new(Arc::clone(&registry), InlineScheduler);

        // Must not panic or report anything; nothing is mutated.
        router.enable_pass_through();
        assert!(registry.updates.lock().is_empty());
    }

    #[test]
    fn enable_pass_through_swallows_enumeration_failure() {
        let registry = Arc::new(FakeRegistry {
            fail_enumerate: true,
            ..Default::default()
        });
        let router = OverlayInputRouter::new(Arc::clone(&registry), InlineScheduler);

        router.enable_pass_through();
        assert!(registry.updates.lock().is_empty());
    }

    #[test]
    fn enable_pass_through_swallows_rejected_write_back() {
        let registry = Arc::new(FakeRegistry {
            surfaces: Mutex::new(vec![overlay(7, 0)]),
            fail_update: true,
            ..Default::default()
        });
        let router = OverlayInputRouter::new(Arc::clone(&registry), InlineScheduler);

        router.enable_pass_through();
        assert!(!registry.surfaces.lock()[0].has_pass_through());
    }
}

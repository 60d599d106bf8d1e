//! Avatar module
//!
//! The loaded avatar (skeleton binding plus secondary-motion state) and
//! asynchronous asset loading with progress reporting.

pub mod loader;

pub use loader::{spawn_load, AvatarLoadHandle, AvatarLoader};

use crate::skeleton::SkeletonBinding;

/// Largest physics step advanced in one render tick; longer gaps are
/// clamped so a frame spike cannot blow up spring simulation.
const MAX_PHYSICS_STEP: f32 = 0.05;

/// Asset-specific secondary motion (spring bones, hair, cloth), advanced by
/// the render clock between retargeting frames.
pub trait SecondaryMotion: Send {
    fn advance(&mut self, binding: &mut SkeletonBinding, delta: f32);
}

/// A loaded avatar: the live skeleton and whatever secondary motion the
/// asset ships. Swapping avatars replaces the whole value; the old binding
/// becomes unreachable rather than mutated.
pub struct Avatar {
    pub binding: SkeletonBinding,
    physics: Option<Box<dyn SecondaryMotion>>,
}

impl Avatar {
    pub fn new(binding: SkeletonBinding) -> Self {
        Self {
            binding,
            physics: None,
        }
    }

    pub fn with_physics(binding: SkeletonBinding, physics: Box<dyn SecondaryMotion>) -> Self {
        Self {
            binding,
            physics: Some(physics),
        }
    }

    /// Advance secondary motion by `delta` seconds of render time.
    pub fn update(&mut self, delta: f32) {
        let delta = delta.min(MAX_PHYSICS_STEP);
        if delta <= 0.0 {
            return;
        }
        if let Some(physics) = &mut self.physics {
            physics.advance(&mut self.binding, delta);
        }
    }
}

impl std::fmt::Debug for Avatar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Avatar")
            .field("binding", &self.binding)
            .field("physics", &self.physics.as_ref().map(|_| "..."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CountingPhysics {
        steps: Arc<AtomicU32>,
        last_delta: Arc<std::sync::Mutex<f32>>,
    }

    impl SecondaryMotion for CountingPhysics {
        fn advance(&mut self, _binding: &mut SkeletonBinding, delta: f32) {
            self.steps.fetch_add(1, Ordering::SeqCst);
            *self.last_delta.lock().unwrap() = delta;
        }
    }

    #[test]
    fn test_update_without_physics_is_noop() {
        let mut avatar = Avatar::new(SkeletonBinding::complete());
        avatar.update(0.016);
    }

    #[test]
    fn test_update_advances_physics() {
        let steps = Arc::new(AtomicU32::new(0));
        let last_delta = Arc::new(std::sync::Mutex::new(0.0));
        let mut avatar = Avatar::with_physics(
            SkeletonBinding::complete(),
            Box::new(CountingPhysics {
                steps: Arc::clone(&steps),
                last_delta: Arc::clone(&last_delta),
            }),
        );

        avatar.update(0.016);
        assert_eq!(steps.load(Ordering::SeqCst), 1);
        assert!((*last_delta.lock().unwrap() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_update_clamps_frame_spikes() {
        let steps = Arc::new(AtomicU32::new(0));
        let last_delta = Arc::new(std::sync::Mutex::new(0.0));
        let mut avatar = Avatar::with_physics(
            SkeletonBinding::complete(),
            Box::new(CountingPhysics {
                steps: Arc::clone(&steps),
                last_delta: Arc::clone(&last_delta),
            }),
        );

        avatar.update(1.5);
        assert!((*last_delta.lock().unwrap() - MAX_PHYSICS_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_zero_delta_skips_physics() {
        let steps = Arc::new(AtomicU32::new(0));
        let mut avatar = Avatar::with_physics(
            SkeletonBinding::complete(),
            Box::new(CountingPhysics {
                steps: Arc::clone(&steps),
                last_delta: Arc::new(std::sync::Mutex::new(0.0)),
            }),
        );

        avatar.update(0.0);
        assert_eq!(steps.load(Ordering::SeqCst), 0);
    }
}

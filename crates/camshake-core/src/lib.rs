pub mod animator;
pub mod config;
pub mod controller;
pub mod damping;
pub mod noise;
pub mod properties;
pub mod transform;

pub use animator::{MAX_ANGLE_DEGREES, ShakeAnimator, TickStatus};
pub use config::{ConfigError, ShakeConfig};
pub use controller::{RunId, ShakeController};
pub use damping::damping_curve;
pub use noise::{ConstantSource, UniformSource};
pub use properties::{Properties, PropertyIssue};
pub use transform::LocalTransform;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::animator::{ShakeAnimator, TickStatus};
    use crate::controller::ShakeController;
    use crate::noise::{ConstantSource, UniformSource};
    use crate::properties::Properties;
    use crate::transform::LocalTransform;

    /// A small, short, fully valid profile for tests that just need a shake.
    pub fn quiet_properties() -> Properties {
        Properties::new(0.0, 0.2, 20.0, 0.3, 0.3, 0.5, 0.5)
    }

    /// Tick an animator with zero noise until it reports `Done`.
    /// Returns the number of ticks taken, or `None` after `max_ticks`.
    pub fn run_until_done(
        animator: &mut ShakeAnimator,
        transform: &mut LocalTransform,
        dt: f32,
        max_ticks: usize,
    ) -> Option<usize> {
        let mut noise = ConstantSource::default();
        (1..=max_ticks).find(|_| animator.tick(dt, transform, &mut noise) == TickStatus::Done)
    }

    /// Run `n` controller ticks of `dt`, returning every status.
    pub fn run_ticks<R: UniformSource>(
        controller: &mut ShakeController<R>,
        transform: &mut LocalTransform,
        dt: f32,
        n: usize,
    ) -> Vec<TickStatus> {
        (0..n).map(|_| controller.tick(dt, transform)).collect()
    }
}

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animator::{ShakeAnimator, TickStatus};
use crate::noise::UniformSource;
use crate::properties::Properties;
use crate::transform::LocalTransform;

/// Identifier of a shake started by a [`ShakeController`]. 0 means none.
pub type RunId = u64;

/// Owns the single active shake for one camera.
///
/// Starting a shake drops whatever was running, without blending: the new
/// run measures its first leg from the transform's current pose, so the
/// camera does not pop back to the origin.
#[derive(Debug)]
pub struct ShakeController<R = StdRng> {
    active: Option<ShakeAnimator>,
    run_id: RunId,
    noise: R,
}

impl Default for ShakeController<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ShakeController<StdRng> {
    /// Controller whose noise is reproducible for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: UniformSource> ShakeController<R> {
    pub fn new(noise: R) -> Self {
        Self {
            active: None,
            run_id: 0,
            noise,
        }
    }

    /// Cancel any running shake and start a new one with `properties`.
    ///
    /// Out-of-range properties are logged, never corrected.
    pub fn start_shake(&mut self, properties: Properties) {
        if let Err(issues) = properties.validate() {
            for issue in &issues {
                tracing::warn!(%issue, "Shake started with out-of-range properties");
            }
        }

        self.run_id += 1;
        let replaced = self.active.take().map(|_| self.run_id - 1);
        match replaced {
            Some(old) => tracing::debug!(run_id = self.run_id, replaced = old, "Shake replaced"),
            None => tracing::debug!(run_id = self.run_id, "Shake started"),
        }
        self.active = Some(ShakeAnimator::new(properties));
    }

    /// Cancel the running shake, leaving the transform where it is.
    pub fn stop(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!(run_id = self.run_id, "Shake stopped");
        }
    }

    /// Advance the active shake by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32, transform: &mut LocalTransform) -> TickStatus {
        let Some(animator) = self.active.as_mut() else {
            return TickStatus::Idle;
        };

        let status = animator.tick(dt, transform, &mut self.noise);
        if status == TickStatus::Done {
            tracing::debug!(
                run_id = self.run_id,
                waypoints = animator.waypoints_chosen(),
                "Shake finished"
            );
            self.active = None;
        }
        status
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ShakeAnimator> {
        self.active.as_ref()
    }

    /// Id of the most recently started run, whether or not it is still going.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::noise::ConstantSource;
    use crate::test_helpers::{quiet_properties, run_ticks};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn idle_controller_writes_nothing() {
        let mut controller = ShakeController::from_seed(1);
        let before = LocalTransform::new(Vec3::new(1.0, 2.0, 3.0), glam::Quat::IDENTITY);
        let mut transform = before;

        assert_eq!(controller.tick(DT, &mut transform), TickStatus::Idle);
        assert_eq!(transform, before);
        assert!(!controller.is_active());
        assert_eq!(controller.run_id(), 0);
    }

    #[test]
    fn start_shake_activates_and_moves_camera() {
        let mut controller = ShakeController::from_seed(7);
        let mut transform = LocalTransform::default();

        controller.start_shake(Properties::default());
        let status = controller.tick(DT, &mut transform);

        assert_eq!(status, TickStatus::Continue);
        assert!(controller.is_active());
        assert_eq!(controller.run_id(), 1);
        assert!(transform.position.length() > 0.0);
    }

    #[test]
    fn second_start_replaces_first_run() {
        let mut controller = ShakeController::new(ConstantSource::default());
        let mut transform = LocalTransform::default();

        // First run heads along +X.
        controller.start_shake(Properties::new(0.0, 1.0, 2.0, 2.0, 0.0, 0.0, 0.0));
        run_ticks(&mut controller, &mut transform, DT, 5);
        let first_target = controller.active().map(ShakeAnimator::current_waypoint);
        let position_at_switch = transform.position;

        // Second run heads along +Y from wherever the camera is now.
        controller.start_shake(Properties::new(90.0, 1.0, 2.0, 2.0, 0.0, 0.0, 0.0));
        assert_eq!(controller.run_id(), 2);
        let fresh = controller.active().expect("second run active");
        assert_eq!(fresh.waypoints_chosen(), 0);
        assert_eq!(fresh.completion_percent(), 0.0);

        controller.tick(DT, &mut transform);
        let second = controller.active().expect("second run still active");
        assert_eq!(second.previous_waypoint(), position_at_switch);
        assert_ne!(Some(second.current_waypoint()), first_target);
        assert!(second.current_waypoint().y > 0.9);

        // Every write from here on heads toward the second run's waypoint.
        let target = second.current_waypoint();
        let mut last_gap = (target - transform.position).length();
        for _ in 0..3 {
            controller.tick(DT, &mut transform);
            let gap = (target - transform.position).length();
            assert!(gap <= last_gap + 1e-6, "camera moved away from the new target");
            last_gap = gap;
        }
    }

    #[test]
    fn stop_cancels_without_moving() {
        let mut controller = ShakeController::from_seed(3);
        let mut transform = LocalTransform::default();
        controller.start_shake(Properties::default());
        run_ticks(&mut controller, &mut transform, DT, 4);

        controller.stop();
        let frozen = transform;

        assert!(!controller.is_active());
        assert_eq!(controller.tick(DT, &mut transform), TickStatus::Idle);
        assert_eq!(transform, frozen);
        assert_eq!(controller.run_id(), 1);
    }

    #[test]
    fn finished_run_is_dropped() {
        let mut controller = ShakeController::from_seed(5);
        let mut transform = LocalTransform::default();
        controller.start_shake(quiet_properties());

        let statuses = run_ticks(&mut controller, &mut transform, DT, 2_000);

        assert_eq!(
            statuses.iter().filter(|s| **s == TickStatus::Done).count(),
            1,
            "exactly one Done per run"
        );
        assert_eq!(statuses.last(), Some(&TickStatus::Idle));
        assert!(!controller.is_active());
        assert_eq!(transform.position, Vec3::ZERO);
    }

    #[test]
    fn invalid_properties_still_start() {
        let mut controller = ShakeController::from_seed(9);
        controller.start_shake(Properties {
            noise_percent: 4.0,
            ..Properties::default()
        });
        assert!(controller.is_active());
    }

    #[test]
    fn same_seed_same_motion() {
        let mut a = ShakeController::from_seed(1234);
        let mut b = ShakeController::from_seed(1234);
        let mut ta = LocalTransform::default();
        let mut tb = LocalTransform::default();
        a.start_shake(Properties::default());
        b.start_shake(Properties::default());

        for _ in 0..40 {
            a.tick(DT, &mut ta);
            b.tick(DT, &mut tb);
            assert_eq!(ta, tb);
        }
    }
}

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::damping::damping_curve;
use crate::noise::UniformSource;
use crate::properties::Properties;
use crate::transform::LocalTransform;

/// Rotation (degrees) reached when a waypoint sits at full strength with
/// `rotation_percent = 1`.
pub const MAX_ANGLE_DEGREES: f32 = 10.0;

/// Result of advancing a shake by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickStatus {
    /// No shake is running; nothing was written.
    Idle,
    /// The transform was written and the shake wants another frame.
    Continue,
    /// The shake has converged. The last write (if any) happened this tick.
    Done,
}

impl TickStatus {
    pub fn is_running(self) -> bool {
        self == Self::Continue
    }
}

/// One in-flight shake: waypoint state plus the profile driving it.
///
/// Each [`tick`](Self::tick) picks a new waypoint once the previous one is
/// reached, then moves the transform toward it. Waypoints alternate sides
/// of the origin (the angle advances by roughly half a turn each time) and
/// shrink with [`damping_curve`] as the duration elapses.
#[derive(Debug, Clone)]
pub struct ShakeAnimator {
    properties: Properties,
    completion_percent: f32,
    move_percent: f32,
    angle: f32,
    previous_waypoint: Vec3,
    current_waypoint: Vec3,
    previous_rotation: Quat,
    target_rotation: Quat,
    move_distance: f32,
    waypoints_chosen: u32,
    finished: bool,
}

impl ShakeAnimator {
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            completion_percent: 0.0,
            move_percent: 0.0,
            // The first waypoint adds half a turn, landing on `angle` itself.
            angle: properties.angle.to_radians() - PI,
            previous_waypoint: Vec3::ZERO,
            current_waypoint: Vec3::ZERO,
            previous_rotation: Quat::IDENTITY,
            target_rotation: Quat::IDENTITY,
            move_distance: 0.0,
            waypoints_chosen: 0,
            finished: false,
        }
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Fraction of the duration elapsed. Keeps growing past 1.
    pub fn completion_percent(&self) -> f32 {
        self.completion_percent
    }

    /// Progress toward the current waypoint. May overshoot 1 until the next
    /// waypoint is chosen.
    pub fn move_percent(&self) -> f32 {
        self.move_percent
    }

    /// Angle (radians, unwrapped) of the current waypoint.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn previous_waypoint(&self) -> Vec3 {
        self.previous_waypoint
    }

    pub fn current_waypoint(&self) -> Vec3 {
        self.current_waypoint
    }

    pub fn target_rotation(&self) -> Quat {
        self.target_rotation
    }

    pub fn move_distance(&self) -> f32 {
        self.move_distance
    }

    pub fn waypoints_chosen(&self) -> u32 {
        self.waypoints_chosen
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the shake by `dt` seconds and write the new pose.
    ///
    /// Returns [`TickStatus::Done`] once a waypoint selection measures zero
    /// distance to travel. A finished animator writes nothing.
    pub fn tick<S>(
        &mut self,
        dt: f32,
        transform: &mut LocalTransform,
        noise: &mut S,
    ) -> TickStatus
    where
        S: UniformSource + ?Sized,
    {
        if self.finished {
            return TickStatus::Done;
        }

        if self.move_percent >= 1.0 || self.completion_percent == 0.0 {
            self.choose_waypoint(transform, noise);
        }

        let props = &self.properties;
        self.completion_percent += dt / props.duration;
        if self.move_distance > 0.0 {
            // Longer legs advance more slowly, keeping linear speed roughly constant.
            self.move_percent += dt / self.move_distance * props.speed;
        } else {
            self.move_percent = 1.0;
        }

        let t = self.move_percent.clamp(0.0, 1.0);
        transform.position = self.previous_waypoint.lerp(self.current_waypoint, t);
        transform.rotation = self.previous_rotation.slerp(self.target_rotation, t);

        if self.move_distance > 0.0 {
            TickStatus::Continue
        } else {
            self.finished = true;
            TickStatus::Done
        }
    }

    fn choose_waypoint<S>(&mut self, transform: &LocalTransform, noise: &mut S)
    where
        S: UniformSource + ?Sized,
    {
        let props = &self.properties;
        let damping_factor = damping_curve(self.completion_percent, props.damping_percent);

        // [0, 1) -> [-PI/2, PI/2)
        let noise_angle = (noise.next_unit() - 0.5) * PI;
        self.angle += PI + noise_angle * props.noise_percent;

        self.current_waypoint = Vec3::new(self.angle.cos(), self.angle.sin(), 0.0)
            * props.strength
            * damping_factor;
        self.previous_waypoint = transform.position;
        self.move_distance = self.current_waypoint.distance(self.previous_waypoint);

        let euler = Vec3::new(self.current_waypoint.y, self.current_waypoint.x, 0.0)
            .normalize_or_zero()
            * props.rotation_percent
            * damping_factor
            * MAX_ANGLE_DEGREES;
        self.target_rotation = euler_degrees_to_quat(euler);
        self.previous_rotation = transform.rotation;

        self.move_percent = 0.0;
        self.waypoints_chosen += 1;
    }
}

/// Euler degrees (pitch x, yaw y, roll z) applied Z, then X, then Y.
fn euler_degrees_to_quat(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

use glam::{Quat, Vec3};
use serde::Serialize;

use camshake_core::{LocalTransform, Properties, RunId, ShakeController, TickStatus, UniformSource};

/// Scripted key presses, in seconds since the start of the simulation.
#[derive(Debug, Clone, Default)]
pub struct KeyScript {
    presses: Vec<f32>,
    next: usize,
}

impl KeyScript {
    /// Non-finite times are dropped; the rest are sorted.
    pub fn new(mut presses: Vec<f32>) -> Self {
        presses.retain(|t| t.is_finite());
        presses.sort_by(f32::total_cmp);
        Self { presses, next: 0 }
    }

    /// Consume and count every press at or before `time`.
    pub fn take_due(&mut self, time: f32) -> usize {
        let start = self.next;
        while self.next < self.presses.len() && self.presses[self.next] <= time {
            self.next += 1;
        }
        self.next - start
    }

    pub fn remaining(&self) -> usize {
        self.presses.len() - self.next
    }
}

/// One rendered frame of the simulation.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSample {
    pub frame: u64,
    pub time: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub status: TickStatus,
    pub run_id: RunId,
}

impl FrameSample {
    pub fn to_text(&self) -> String {
        let p = self.position;
        let e = LocalTransform::new(self.position, self.rotation).euler_degrees();
        format!(
            "{:>5} {:>7.3}s run {:<3} pos ({:+.4}, {:+.4}, {:+.4}) \
             rot ({:+.3}, {:+.3}, {:+.3})deg {:?}",
            self.frame, self.time, self.run_id, p.x, p.y, p.z, e.x, e.y, e.z, self.status
        )
    }
}

/// Drive `controller` at a fixed frame rate for `seconds`, starting a
/// shake with `properties` on every scripted press.
///
/// A press is handled at the start of the first frame whose time has
/// reached it, before that frame's tick, so the new shake moves the camera
/// on the same frame. Several presses landing in one frame restart once
/// per press; only the last survives.
pub fn simulate<R: UniformSource>(
    controller: &mut ShakeController<R>,
    properties: Properties,
    script: &mut KeyScript,
    fps: u32,
    seconds: f32,
) -> Vec<FrameSample> {
    let dt = 1.0 / fps.max(1) as f32;
    let frames = (seconds.max(0.0) / dt).ceil() as u64;
    let mut transform = LocalTransform::default();
    let mut samples = Vec::with_capacity(frames as usize);

    for frame in 0..frames {
        let time = frame as f32 * dt;
        for _ in 0..script.take_due(time) {
            controller.start_shake(properties);
            tracing::info!(frame, time, run_id = controller.run_id(), "Key pressed, shaking");
        }

        let status = controller.tick(dt, &mut transform);
        samples.push(FrameSample {
            frame,
            time,
            position: transform.position,
            rotation: transform.rotation,
            status,
            run_id: controller.run_id(),
        });
    }

    if script.remaining() > 0 {
        tracing::debug!(
            remaining = script.remaining(),
            "Presses scheduled after the simulation ended"
        );
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_sorts_and_drops_non_finite() {
        let mut script = KeyScript::new(vec![1.0, f32::NAN, 0.5, f32::INFINITY]);
        assert_eq!(script.remaining(), 2);
        assert_eq!(script.take_due(0.4), 0);
        assert_eq!(script.take_due(0.5), 1);
        assert_eq!(script.take_due(10.0), 1);
        assert_eq!(script.remaining(), 0);
    }

    #[test]
    fn text_line_mentions_status() {
        let sample = FrameSample {
            frame: 3,
            time: 0.05,
            position: Vec3::new(0.1, -0.2, 0.0),
            rotation: Quat::IDENTITY,
            status: TickStatus::Continue,
            run_id: 1,
        };
        let line = sample.to_text();
        assert!(line.contains("Continue"), "{line}");
        assert!(line.contains("+0.1000"), "{line}");
    }
}
